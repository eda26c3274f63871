use clap::Args;
use enrol_app::domain::carts::{CartItem, CourseId};

#[derive(Debug, Args)]
pub(crate) struct AddItemArgs {
    /// Course id
    #[arg(long)]
    course_id: CourseId,

    /// Course title
    #[arg(long)]
    title: String,

    /// List price in pence/cents
    #[arg(long)]
    price: u64,

    /// Sale price in pence/cents
    #[arg(long)]
    sale_price: Option<u64>,

    /// Course slug
    #[arg(long)]
    slug: String,

    /// Featured image URL
    #[arg(long)]
    featured_image: Option<String>,
}

impl From<AddItemArgs> for CartItem {
    fn from(args: AddItemArgs) -> Self {
        Self {
            course_id: args.course_id,
            title: args.title,
            price: args.price,
            sale_price: args.sale_price,
            slug: args.slug,
            featured_image: args.featured_image,
        }
    }
}
