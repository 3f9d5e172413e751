//! Global constants and bit-vector helpers.
//!
//! Widths and masks shared by the TileLink surface, the port, and the pipeline
//! model. Data beats are carried in a `u64`, masks in a `u8` (one bit per byte lane).

/// Widest data path the model carries (bytes per beat).
pub const MAX_BEAT_BYTES: u64 = 8;

/// Widest reset synchronizer the register vector can hold.
pub const MAX_SYNC_DEPTH: usize = 64;

/// Default reset synchronizer depth.
pub const DEFAULT_SYNC_DEPTH: usize = 3;

/// Largest scratchpad region the pipeline model backs with storage (256 MiB).
pub const MAX_SPAD_BYTES: u64 = 1 << 28;

/// Smallest access size the atomic operations support (bytes).
pub const MIN_ATOMIC_BYTES: u64 = 4;

/// Returns `2^lg_size` bytes for a TileLink `size` field.
#[inline(always)]
pub const fn size_bytes(lg_size: u8) -> u64 {
    1u64 << lg_size
}

/// Returns the byte-lane mask covering an access of `2^lg_size` bytes at `addr`.
///
/// Accesses of a full beat or wider enable every lane. This mirrors the mask a
/// TileLink master must place on Get, PutFullData, and atomic messages.
///
/// # Arguments
///
/// * `addr` - Byte address of the access.
/// * `lg_size` - log2 of the access size in bytes.
/// * `beat_bytes` - Data-path width in bytes (power of two, at most 8).
pub const fn lane_mask(addr: u64, lg_size: u8, beat_bytes: u64) -> u8 {
    let beat_all = beat_mask(beat_bytes);
    if lg_size >= 8 {
        return beat_all;
    }
    let bytes = size_bytes(lg_size);
    if bytes >= beat_bytes {
        return beat_all;
    }
    let lanes = ((1u16 << bytes) - 1) as u8;
    let lane = (addr & (beat_bytes - 1)) & !(bytes - 1);
    (lanes << lane) & beat_all
}

/// Returns a mask with one bit set per byte lane of the beat.
#[inline(always)]
pub const fn beat_mask(beat_bytes: u64) -> u8 {
    ((1u16 << beat_bytes) - 1) as u8
}

/// Expands a byte-lane mask into a bit mask over the 64-bit data beat.
pub const fn expand_mask(mask: u8) -> u64 {
    let mut out = 0u64;
    let mut i = 0;
    while i < 8 {
        if mask & (1 << i) != 0 {
            out |= 0xFF << (i * 8);
        }
        i += 1;
    }
    out
}
