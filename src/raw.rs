/// Identifier of a readout channel.
pub type ChannelId = u32;

/// A digitizer time sample index.
pub type TdcTick = i32;

/// Reserved [`ChannelId`] that does not correspond to any readout channel.
pub const INVALID_CHANNEL_ID: ChannelId = ChannelId::MAX;

/// Returns `true` unless `channel` is the [`INVALID_CHANNEL_ID`] sentinel.
///
/// # Examples
///
/// ```
/// use dataobj::raw::{is_valid_channel, INVALID_CHANNEL_ID};
///
/// assert!(is_valid_channel(0));
/// assert!(!is_valid_channel(INVALID_CHANNEL_ID));
/// ```
pub fn is_valid_channel(channel: ChannelId) -> bool {
    channel != INVALID_CHANNEL_ID
}
