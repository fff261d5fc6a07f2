//! Fixed-duration microphone capture.
//!
//! The recorder captures from an input device at its native format, converts
//! to mono at the configured sample rate, and writes a 16-bit PCM WAV over the
//! recording artifact. Each recording replaces the previous one.

use crate::{AudioHandle, Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::NamedTempFile;

/// Anything that can produce a recording for the transcriber
pub trait AudioCapture {
    /// Record for `duration`, blocking until finished
    fn record(&mut self, duration: Duration) -> Result<AudioHandle>;
}

/// Records from a cpal input device
pub struct MicrophoneRecorder {
    /// Device name, or "default" for the system default input
    device_name: String,
    /// Sample rate of the written WAV
    sample_rate: u32,
    /// Where the recording artifact is written
    output_path: PathBuf,
}

impl MicrophoneRecorder {
    pub fn new(device_name: impl Into<String>, sample_rate: u32, output_path: PathBuf) -> Self {
        Self {
            device_name: device_name.into(),
            sample_rate,
            output_path,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

impl AudioCapture for MicrophoneRecorder {
    fn record(&mut self, duration: Duration) -> Result<AudioHandle> {
        let host = cpal::default_host();
        let device = find_input_device(&host, &self.device_name)?;

        let device_name = device
            .name()
            .unwrap_or_else(|_| "Unknown device".to_string());
        tracing::info!("Recording device: {}", device_name);

        let supported = device
            .default_input_config()
            .map_err(|e| Error::Recording(format!("Failed to get input config: {}", e)))?;
        let device_rate = supported.sample_rate().0;
        let channels = supported.channels() as usize;
        let sample_format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();

        tracing::debug!(
            "Device configuration: {}Hz, {} channels, {:?}",
            device_rate,
            channels,
            sample_format
        );

        let buffer = Arc::new(Mutex::new(Vec::<f32>::new()));
        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, Arc::clone(&buffer))?,
            SampleFormat::I16 => build_stream::<i16>(&device, &config, Arc::clone(&buffer))?,
            SampleFormat::U16 => build_stream::<u16>(&device, &config, Arc::clone(&buffer))?,
            other => {
                return Err(Error::Recording(format!(
                    "Unsupported sample format: {:?}",
                    other
                )))
            }
        };

        stream
            .play()
            .map_err(|e| Error::Recording(format!("Failed to start audio stream: {}", e)))?;
        tracing::info!("Recording for {:.1}s", duration.as_secs_f32());
        std::thread::sleep(duration);
        drop(stream);

        let captured = buffer
            .lock()
            .map(|samples| samples.clone())
            .map_err(|_| Error::Recording("Capture buffer was poisoned".into()))?;
        if captured.is_empty() {
            return Err(Error::Recording("No audio samples captured".into()));
        }

        let mono = downmix_to_mono(&captured, channels);
        let resampled = resample_linear(&mono, device_rate, self.sample_rate);
        save_recording(&resampled, self.sample_rate, &self.output_path)?;

        tracing::info!(
            "Recording saved: {} ({} samples at {}Hz)",
            self.output_path.display(),
            resampled.len(),
            self.sample_rate
        );

        Ok(AudioHandle {
            path: self.output_path.clone(),
            sample_rate: self.sample_rate,
            samples: resampled.len(),
        })
    }
}

fn find_input_device(host: &cpal::Host, name: &str) -> Result<cpal::Device> {
    if name == "default" {
        return host
            .default_input_device()
            .ok_or_else(|| Error::Recording("No audio input device available".into()));
    }

    let mut devices = host
        .input_devices()
        .map_err(|e| Error::Recording(format!("Failed to list input devices: {}", e)))?;
    devices
        .find(|d| d.name().map(|n| n == name).unwrap_or(false))
        .ok_or_else(|| Error::Recording(format!("Input device '{}' not found", name)))
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    buffer: Arc<Mutex<Vec<f32>>>,
) -> Result<cpal::Stream>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                if let Ok(mut samples) = buffer.lock() {
                    samples.extend(data.iter().map(|&s| f32::from_sample(s)));
                }
            },
            |err| {
                tracing::warn!("Audio stream error: {}", err);
            },
            None,
        )
        .map_err(|e| Error::Recording(format!("Failed to build input stream: {}", e)))
}

/// Average interleaved frames down to a single channel
pub fn downmix_to_mono(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

/// Linear-interpolation resampling
pub fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() || from_rate == 0 || to_rate == 0 {
        return samples.to_vec();
    }

    let ratio = f64::from(from_rate) / f64::from(to_rate);
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;
    let last = samples.len() - 1;

    (0..output_len)
        .map(|i| {
            let position = i as f64 * ratio;
            let lower = (position.floor() as usize).min(last);
            let upper = (lower + 1).min(last);
            let fract = position - position.floor();
            let a = f64::from(samples[lower]);
            let b = f64::from(samples[upper]);
            (a + (b - a) * fract) as f32
        })
        .collect()
}

/// Write mono samples as 16-bit PCM, atomically replacing `path`
pub fn write_wav(samples: &[f32], sample_rate: u32, path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent)?;

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let temp = NamedTempFile::new_in(&parent)?;
    {
        let mut writer = hound::WavWriter::new(BufWriter::new(temp.as_file()), spec)?;
        for &sample in samples {
            let clamped = sample.clamp(-1.0, 1.0);
            writer.write_sample((clamped * f32::from(i16::MAX)) as i16)?;
        }
        writer.finalize()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Wrote {} samples to {:?}", samples.len(), path);
    Ok(())
}

/// Write the recording artifact; any failure counts as a recording failure
fn save_recording(samples: &[f32], sample_rate: u32, path: &Path) -> Result<()> {
    write_wav(samples, sample_rate, path)
        .map_err(|e| Error::Recording(format!("Failed to save recording: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downmix_averages_channels() {
        let stereo = [1.0, 0.0, 0.5, 0.5, -1.0, 1.0];
        assert_eq!(downmix_to_mono(&stereo, 2), vec![0.5, 0.5, 0.0]);
        assert_eq!(downmix_to_mono(&stereo, 1), stereo.to_vec());
    }

    #[test]
    fn test_resample_down_and_passthrough() {
        let samples: Vec<f32> = (0..48).map(|i| i as f32 / 48.0).collect();

        let resampled = resample_linear(&samples, 48_000, 16_000);
        assert_eq!(resampled.len(), 16);
        assert!((resampled[1] - samples[3]).abs() < 1e-6);

        assert_eq!(resample_linear(&samples, 16_000, 16_000), samples);
        assert!(resample_linear(&[], 44_100, 16_000).is_empty());
    }

    #[test]
    fn test_write_wav_overwrites_artifact() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("recording.wav");

        write_wav(&[0.0; 32], 16_000, &path).unwrap();
        write_wav(&[0.25; 8], 16_000, &path).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16_000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.len(), 8);

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "recording.wav")
            .collect();
        assert!(extras.is_empty(), "Unexpected files: {:?}", extras);
    }

    #[test]
    fn test_unwritable_recording_is_a_recording_failure() {
        let temp_dir = tempfile::tempdir().unwrap();
        let blocker = temp_dir.path().join("not_a_dir");
        std::fs::write(&blocker, b"").unwrap();

        let err = save_recording(&[0.0; 8], 16_000, &blocker.join("recording.wav")).unwrap_err();

        assert!(matches!(err, Error::Recording(ref msg) if msg.starts_with("Failed to save recording")));
        assert_eq!(
            err.user_message(),
            "Failed to record audio. Please check your microphone."
        );
    }
}
