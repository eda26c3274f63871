use std::path::PathBuf;

use clap::{Args, Subcommand};
use enrol_app::domain::carts::{CartStore, CourseId, FileStorage};

mod add;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    /// Directory the cart is persisted in
    #[arg(long, env = "CART_DIR", default_value = ".enrol")]
    cart_dir: PathBuf,

    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Add a course, replacing any existing entry for it
    Add(add::AddItemArgs),

    /// Remove a course
    Remove {
        /// Course id
        #[arg(long)]
        course_id: CourseId,
    },

    /// List the cart
    List,

    /// Empty the cart
    Clear,
}

pub(crate) fn run(command: CartCommand) -> Result<(), String> {
    let mut store = CartStore::open(FileStorage::new(&command.cart_dir));

    // Mutating after a failed read would overwrite the unreadable cart.
    if store.persistence_degraded() {
        return Err(format!(
            "cart in {} could not be read",
            command.cart_dir.display()
        ));
    }

    match command.command {
        CartSubcommand::Add(args) => store.add_item(args.into()),
        CartSubcommand::Remove { course_id } => store.remove_item(&course_id),
        CartSubcommand::List => {}
        CartSubcommand::Clear => store.clear(),
    }

    if store.persistence_degraded() {
        return Err(format!(
            "cart in {} could not be saved",
            command.cart_dir.display()
        ));
    }

    print_cart(&store);

    Ok(())
}

fn print_cart(store: &CartStore<FileStorage>) {
    let items = store.items();

    if items.is_empty() {
        println!("cart is empty");
        return;
    }

    for item in items {
        println!("course_id: {}", item.course_id);
        println!("title: {}", item.title);
        println!("slug: {}", item.slug);
        println!("price: {}", item.price);
        println!(
            "sale_price: {}",
            item.sale_price
                .map_or_else(|| "none".to_string(), |value| value.to_string())
        );
        println!();
    }

    println!("items: {}", store.item_count());
    println!("total: {}", store.total());
}
