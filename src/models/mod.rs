pub mod application;
pub mod compare;
pub mod job;
pub mod marketer;
pub mod message;
pub mod post;
pub mod user;
pub mod vc;
