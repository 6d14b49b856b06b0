pub mod add;
pub mod consume;
pub mod delete;
pub mod show;
mod target;
pub mod update;

pub use add::handle_add;
pub use consume::handle_consume;
pub use delete::handle_delete;
pub use show::handle_show;
pub use update::handle_update;
