#![deny(clippy::all, clippy::pedantic)]

use blog_admin::application::tags::{TagSession, VocabularyDelete};
use blog_admin::domain::tags::normalize_name;
use blog_admin::presentation::views;

use super::confirmer;
use crate::args::TagsCmd;
use crate::client::{CliError, Ctx};
use crate::print::print_text;

pub async fn handle(ctx: &Ctx, cmd: TagsCmd) -> Result<(), CliError> {
    let api = ctx.signed_in_api()?;
    let mut session = TagSession::new(api);

    match cmd {
        TagsCmd::List => {
            session.fetch_vocabulary().await?;
            print_text(&views::tag_list(session.vocabulary()));
        }
        TagsCmd::Add { name } => {
            let name = normalize_name(&name)
                .ok_or_else(|| CliError::InvalidInput("tag name is empty".into()))?;
            let tag = session.create_in_vocabulary(name).await?;
            print_text(&views::tag_list(std::slice::from_ref(&tag)));
        }
        TagsCmd::Delete { name, yes } => {
            session.fetch_vocabulary().await?;
            let tag = session
                .find(&name)
                .cloned()
                .ok_or_else(|| CliError::InvalidInput(format!("unknown tag `{name}`")))?;
            let confirm = confirmer(yes);
            match session
                .delete_from_vocabulary(&tag, None, confirm.as_ref())
                .await?
            {
                VocabularyDelete::Deleted => println!("Deleted tag {}", tag.tag),
                VocabularyDelete::Declined => println!("Aborted"),
            }
        }
    }
    Ok(())
}
