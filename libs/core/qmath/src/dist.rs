mod normal;

pub use normal::StdNormal;
