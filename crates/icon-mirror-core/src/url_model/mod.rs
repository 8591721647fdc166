//! URL modeling: file names for mirrored images.

mod path;

pub use path::file_name_from_url;
