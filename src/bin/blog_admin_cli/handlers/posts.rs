#![deny(clippy::all, clippy::pedantic)]

use blog_admin::application::dashboard::{Dashboard, DeleteOutcome};
use blog_admin::application::editor::PostEditor;
use blog_admin::application::tags::{AddTagOutcome, TagSession};
use blog_admin::domain::filter::PostFilter;
use blog_admin::presentation::views;
use blog_admin_api_types::Post;
use tracing::{info, warn};

use super::confirmer;
use crate::args::PostsCmd;
use crate::client::{CliError, Ctx};
use crate::io::{read_opt_value, read_value};
use crate::print::{print_json, print_text};

pub async fn handle(ctx: &Ctx, cmd: PostsCmd) -> Result<(), CliError> {
    let api = ctx.signed_in_api()?;

    match cmd {
        PostsCmd::List {
            category,
            status,
            tags,
            json,
        } => {
            let mut dashboard = Dashboard::new(api);
            dashboard.filter = PostFilter::default()
                .with_category(category)
                .with_status(status)
                .with_tags(tags.iter().cloned())
                .with_published_rule(ctx.published_rule);
            dashboard.load().await?;

            let known = dashboard.tag_names();
            for name in tags.iter().filter(|name| !known.contains(name.as_str())) {
                warn!(target = "blog_admin::cli", tag = %name, "no loaded post carries this tag");
            }

            let visible = dashboard.visible();
            if json {
                print_json(&visible)?;
            } else {
                print_text(&views::dashboard(&visible));
            }
        }
        PostsCmd::Get { id, json } => {
            let editor = PostEditor::open(api, &id).await?;
            if json {
                print_json(editor.post())?;
            } else {
                print_text(&views::post_detail(editor.post()));
            }
        }
        PostsCmd::Create {
            title,
            category,
            body,
            body_file,
            cover_image,
            tags,
        } => {
            let body = read_value(body, body_file)?;
            let mut editor = PostEditor::create(api.clone());
            editor.set_title(title)?;
            editor.set_category(category)?;
            editor.set_body(body)?;
            editor.set_cover_image(cover_image.as_deref())?;

            if !tags.is_empty() {
                let mut session = TagSession::new(api);
                attach_tags(&mut session, editor.draft_mut()?, &tags).await?;
            }

            editor.save().await?;
            info!(target = "blog_admin::cli", id = %editor.post().id, "post created");
            print_text(&views::post_detail(editor.post()));
        }
        PostsCmd::Edit {
            id,
            title,
            category,
            body,
            body_file,
            cover_image,
            images,
            add_tags,
            remove_tags,
        } => {
            let body = read_opt_value(body, body_file)?;
            let mut editor = PostEditor::open(api.clone(), &id).await?;
            editor.edit();

            if let Some(title) = title {
                editor.set_title(title)?;
            }
            if let Some(category) = category {
                editor.set_category(category)?;
            }
            if let Some(body) = body {
                editor.set_body(body)?;
            }
            if let Some(cover) = cover_image {
                editor.set_cover_image(Some(&cover))?;
            }
            for image in &images {
                editor.insert_image(image)?;
            }

            if !add_tags.is_empty() || !remove_tags.is_empty() {
                let mut session = TagSession::new(api);
                let draft = editor.draft_mut()?;
                for name in &remove_tags {
                    detach_tag(&session, draft, name);
                }
                attach_tags(&mut session, draft, &add_tags).await?;
            }

            editor.save().await?;
            print_text(&views::post_detail(editor.post()));
        }
        PostsCmd::Delete { id, yes } => {
            let mut dashboard = Dashboard::new(api);
            dashboard.load().await?;
            if !dashboard.posts().iter().any(|post| post.id == id) {
                return Err(CliError::InvalidInput(format!("unknown post `{id}`")));
            }

            let confirm = confirmer(yes);
            match dashboard.delete(&id, confirm.as_ref()).await? {
                DeleteOutcome::Deleted => println!("Deleted post {id}"),
                DeleteOutcome::Declined => println!("Aborted"),
            }
        }
    }
    Ok(())
}

/// Known names are selected from the vocabulary; unknown names are created
/// there first.
async fn attach_tags(
    session: &mut TagSession,
    post: &mut Post,
    names: &[String],
) -> Result<(), CliError> {
    if names.is_empty() {
        return Ok(());
    }
    session.fetch_vocabulary().await?;

    for name in names {
        if let Some(known) = session.find(name).cloned() {
            session.select(&known, post);
            continue;
        }
        match session.add(name, post).await? {
            AddTagOutcome::Added(tag) => {
                info!(target = "blog_admin::cli", id = %tag.id, tag = %tag.tag, "tag created");
            }
            AddTagOutcome::AlreadyOnPost | AddTagOutcome::Empty => {}
        }
    }
    Ok(())
}

fn detach_tag(session: &TagSession, post: &mut Post, name: &str) {
    let Some(id) = post
        .tags
        .iter()
        .find(|tag| tag.matches_name(name))
        .map(|tag| tag.id.clone())
    else {
        warn!(target = "blog_admin::cli", tag = name, "post does not carry this tag");
        return;
    };
    session.deselect(&id, post);
}
