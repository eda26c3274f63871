use clap::Args;
use enrol_app::{
    context::AppContext,
    domain::purchases::{
        EntitlementsError,
        models::{ContentKind, ContentRef, UserId},
    },
};

use crate::cli::content_store::ContentStoreArgs;

#[derive(Debug, Args)]
#[command(group = clap::ArgGroup::new("content").required(true).args(["post_id", "course_id"]))]
pub(crate) struct CheckPurchaseArgs {
    #[command(flatten)]
    content_store: ContentStoreArgs,

    /// Purchaser id
    #[arg(long)]
    user_id: String,

    /// Post (article) id
    #[arg(long)]
    post_id: Option<String>,

    /// Course id
    #[arg(long)]
    course_id: Option<String>,
}

pub(crate) async fn run(args: CheckPurchaseArgs) -> Result<(), String> {
    let user = UserId::new(&args.user_id)
        .map_err(EntitlementsError::from)
        .map_err(|error| error.to_string())?;

    let content = match (args.post_id, args.course_id) {
        (Some(post), None) => ContentRef::parse(ContentKind::Post, post),
        (None, Some(course)) => ContentRef::parse(ContentKind::Course, course),
        _ => return Err("exactly one of --post-id or --course-id is required".to_string()),
    }
    .map_err(|error| error.to_string())?;

    let app = AppContext::from_content_store(args.content_store.into())
        .map_err(|error| format!("failed to initialize app context: {error}"))?;

    let purchased = app
        .entitlements
        .check_purchase(&user, &content)
        .await
        .map_err(|error| format!("could not determine purchase status: {error}"))?;

    if purchased {
        println!("purchased");
    } else {
        println!("not purchased");
    }

    Ok(())
}
