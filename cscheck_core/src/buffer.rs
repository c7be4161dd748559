//! Read buffer sizing
//!
//! The buffer size is picked once per job from the file length. Small files
//! get a small buffer so progress moves in fine steps; large files get a
//! large one so the read loop makes fewer syscalls.

/// Files shorter than this use [`SMALL_BUFFER_SIZE`] (10 MiB)
pub const SMALL_FILE_LIMIT: u64 = 10 * 1024 * 1024;

/// Files up to and including this length use [`MEDIUM_BUFFER_SIZE`] (500 MiB)
pub const MEDIUM_FILE_LIMIT: u64 = 500 * 1024 * 1024;

/// Buffer for files under 10 MiB (1 KiB)
pub const SMALL_BUFFER_SIZE: usize = 1024;

/// Buffer for files from 10 MiB to 500 MiB (100 KiB)
pub const MEDIUM_BUFFER_SIZE: usize = 100 * 1024;

/// Buffer for files over 500 MiB
pub const LARGE_BUFFER_SIZE: usize = 2_048_000;

/// Select the read buffer size for a file of `file_len` bytes
pub fn buffer_size_for(file_len: u64) -> usize {
    if file_len < SMALL_FILE_LIMIT {
        SMALL_BUFFER_SIZE
    } else if file_len <= MEDIUM_FILE_LIMIT {
        MEDIUM_BUFFER_SIZE
    } else {
        LARGE_BUFFER_SIZE
    }
}

/// Number of non-empty reads needed to stream `file_len` bytes
pub fn expected_reads(file_len: u64) -> u64 {
    file_len.div_ceil(buffer_size_for(file_len) as u64)
}

/// Allocate a zeroed read buffer for a file of `file_len` bytes
pub fn allocate_buffer(file_len: u64) -> Vec<u8> {
    vec![0u8; buffer_size_for(file_len)]
}
