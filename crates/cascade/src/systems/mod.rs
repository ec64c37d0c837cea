pub mod advisor;
pub mod animation;
pub mod board;
pub mod matcher;
pub mod physics;
pub mod selection;
pub mod settle;
