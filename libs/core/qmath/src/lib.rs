pub mod dist;
pub mod num;
