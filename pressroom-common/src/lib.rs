//! Model types, derived article views and the route table of the Pressroom blog client.

pub mod model;
pub mod routes;
pub mod views;
