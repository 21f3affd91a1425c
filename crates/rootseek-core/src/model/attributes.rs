/// Filesystem attribute bits used by attribute masks and found entries.
///
/// Values follow the conventional Windows `FILE_ATTRIBUTE_*` layout so that
/// on Windows the raw attribute word of an entry can be used unchanged.
/// Other platforms synthesize the subset that has a meaning there.
use bitflags::bitflags;
use std::fs::Metadata;

bitflags! {
    /// Attribute bitmask of a file or directory.
    ///
    /// `NORMAL` is the "no special attributes" marker. A target mask that
    /// contains it (or is empty) disables the attribute stage.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct FileAttributes: u32 {
        const READ_ONLY           = 0x0000_0001;
        const HIDDEN              = 0x0000_0002;
        const SYSTEM              = 0x0000_0004;
        const DIRECTORY           = 0x0000_0010;
        const ARCHIVE             = 0x0000_0020;
        const DEVICE              = 0x0000_0040;
        const NORMAL              = 0x0000_0080;
        const TEMPORARY           = 0x0000_0100;
        const SPARSE_FILE         = 0x0000_0200;
        const REPARSE_POINT       = 0x0000_0400;
        const COMPRESSED          = 0x0000_0800;
        const OFFLINE             = 0x0000_1000;
        const NOT_CONTENT_INDEXED = 0x0000_2000;
        const ENCRYPTED           = 0x0000_4000;
    }
}

impl FileAttributes {
    /// Derive the attribute word for an entry.
    ///
    /// `meta` must be the entry's own metadata (not following symlinks).
    /// `is_dir` is passed separately so a symlink that resolves to a
    /// directory is still flagged `DIRECTORY`.
    #[cfg(windows)]
    pub fn from_metadata(_name: &str, meta: &Metadata, is_dir: bool) -> Self {
        use std::os::windows::fs::MetadataExt;
        let mut attrs = Self::from_bits_retain(meta.file_attributes());
        if is_dir {
            attrs |= Self::DIRECTORY;
        }
        attrs
    }

    /// Derive the attribute word for an entry.
    ///
    /// `meta` must be the entry's own metadata (not following symlinks).
    /// `is_dir` is passed separately so a symlink that resolves to a
    /// directory is still flagged `DIRECTORY`.
    #[cfg(not(windows))]
    pub fn from_metadata(name: &str, meta: &Metadata, is_dir: bool) -> Self {
        let mut attrs = Self::empty();
        if is_dir {
            attrs |= Self::DIRECTORY;
        }
        if meta.permissions().readonly() {
            attrs |= Self::READ_ONLY;
        }
        if name.len() > 1 && name.starts_with('.') {
            attrs |= Self::HIDDEN;
        }
        if meta.file_type().is_symlink() {
            attrs |= Self::REPARSE_POINT;
        }
        if attrs.is_empty() {
            attrs = Self::NORMAL;
        }
        attrs
    }

    /// Render as `"READ_ONLY | HIDDEN"`, or an empty string for no bits.
    pub fn describe(self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = bitflags::parser::to_writer(&self, &mut out);
        out
    }
}
