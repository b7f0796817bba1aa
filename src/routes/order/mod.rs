mod get;
mod post;
mod update;

pub use get::{list_shop_orders, list_table_orders, GetOrderError};
pub use post::{place_order, OrderJson, PostOrderError};
pub use update::{provide_order, UpdateOrderError};
