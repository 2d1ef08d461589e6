//! WAV renderer — encodes an AudioClip as a mono 16-bit WAV byte buffer.

use super::synth::AudioClip;

/// Render a clip to a WAV file as bytes (16-bit mono PCM).
pub fn render_wav(clip: &AudioClip) -> Vec<u8> {
    let pcm = to_pcm_i16(&clip.samples);
    let data_size = (pcm.len() * BYTES_PER_SAMPLE as usize) as u32;

    let mut buf = Vec::with_capacity(WAV_HEADER_LEN + data_size as usize);
    write_header(&mut buf, clip.sample_rate, data_size);
    for sample in pcm {
        buf.extend_from_slice(&sample.to_le_bytes());
    }
    buf
}

/// Convert float samples in [-1, 1] to i16, clamping anything outside.
pub fn to_pcm_i16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| (s as f64 * 32767.0).round().clamp(-32768.0, 32767.0) as i16)
        .collect()
}

const WAV_HEADER_LEN: usize = 44;
const BYTES_PER_SAMPLE: u16 = 2;

/// RIFF/WAVE header for one channel of 16-bit PCM.
fn write_header(buf: &mut Vec<u8>, sample_rate: u32, data_size: u32) {
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&(36 + data_size).to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
    buf.extend_from_slice(&1u16.to_le_bytes()); // mono
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&(sample_rate * BYTES_PER_SAMPLE as u32).to_le_bytes());
    buf.extend_from_slice(&BYTES_PER_SAMPLE.to_le_bytes());
    buf.extend_from_slice(&(BYTES_PER_SAMPLE * 8).to_le_bytes());

    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
}
