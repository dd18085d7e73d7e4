pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No link color for group index {group_index} (palette has {palette_len} colors)")]
    PaletteExhausted {
        group_index: usize,
        palette_len: usize,
    },

    #[error("Invalid settings JSON: {message}")]
    Settings { message: String },
}
