//! File-backed input: WAV files, or a WAV stream on stdin.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader};
use tracing::debug;

use crate::{ChannelEvent, ChannelWatcher, InputError, InputSource};

/// WAV input bound to a file path, or to stdin when the name is `-`.
pub struct FileInput {
    name: String,
    reader: WavReader<Box<dyn Read + Send>>,
    channels: u16,
    sample_rate: u32,
    format: SampleFormat,
    bits: u16,
}

impl std::fmt::Debug for FileInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileInput")
            .field("name", &self.name)
            .field("channels", &self.channels)
            .field("sample_rate", &self.sample_rate)
            .field("format", &self.format)
            .field("bits", &self.bits)
            .finish_non_exhaustive()
    }
}

impl FileInput {
    pub fn open(source: &str) -> Result<Self, InputError> {
        let raw: Box<dyn Read + Send> = if source == "-" {
            Box::new(io::stdin())
        } else {
            let path = Path::new(source);
            if !path.is_file() {
                return Err(InputError::SourceNotFound(source.to_string()));
            }
            Box::new(BufReader::new(File::open(path)?))
        };

        let reader = WavReader::new(raw)?;
        let spec = reader.spec();
        // The integer scaler shifts by bits - 1; never trust the header.
        if spec.sample_format == SampleFormat::Int
            && !(1..=32).contains(&spec.bits_per_sample)
        {
            return Err(InputError::UnsupportedFormat(format!(
                "{} bits per sample",
                spec.bits_per_sample
            )));
        }
        debug!(
            source,
            rate = spec.sample_rate,
            channels = spec.channels,
            bits = spec.bits_per_sample,
            "opened file input"
        );

        Ok(Self {
            name: source.to_string(),
            reader,
            channels: spec.channels.max(1),
            sample_rate: spec.sample_rate,
            format: spec.sample_format,
            bits: spec.bits_per_sample,
        })
    }

    /// Next raw sample normalized to [-1, 1], or `None` at end of stream.
    fn next_sample(&mut self) -> Result<Option<f32>, InputError> {
        let sample = match self.format {
            SampleFormat::Float => self.reader.samples::<f32>().next().transpose()?,
            SampleFormat::Int => {
                let scale = (1i64 << (self.bits - 1)) as f32;
                self.reader
                    .samples::<i32>()
                    .next()
                    .transpose()?
                    .map(|s| s as f32 / scale)
            }
        };
        Ok(sample)
    }
}

impl InputSource for FileInput {
    fn name(&self) -> &str {
        &self.name
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn read_chunk(&mut self, buf: &mut [f32]) -> Result<usize, InputError> {
        let mut written = 0;
        while written < buf.len() {
            // Average one full frame down to mono.
            let mut acc = 0.0f32;
            let mut got = 0u16;
            for _ in 0..self.channels {
                match self.next_sample()? {
                    Some(s) => {
                        acc += s;
                        got += 1;
                    }
                    None => break,
                }
            }
            if got == 0 {
                break;
            }
            buf[written] = acc / f32::from(self.channels);
            written += 1;
        }
        Ok(written)
    }
}

/// Polls a directory for files appearing and disappearing.
///
/// Only regular files count as channels; subdirectories and special files
/// are ignored.
#[derive(Debug)]
pub struct FileWatcher {
    dir: PathBuf,
    known: BTreeSet<String>,
}

impl FileWatcher {
    pub fn new(dir: &str) -> Result<Self, InputError> {
        let dir = PathBuf::from(dir);
        if !dir.is_dir() {
            return Err(InputError::SourceNotFound(dir.display().to_string()));
        }
        Ok(Self {
            dir,
            known: BTreeSet::new(),
        })
    }
}

impl ChannelWatcher for FileWatcher {
    fn poll(&mut self) -> Result<Vec<ChannelEvent>, InputError> {
        let mut current = BTreeSet::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                current.insert(entry.path().to_string_lossy().into_owned());
            }
        }

        let mut events = Vec::new();
        for name in current.difference(&self.known) {
            events.push(ChannelEvent::Appeared(name.clone()));
        }
        for name in self.known.difference(&current) {
            events.push(ChannelEvent::Disappeared(name.clone()));
        }
        self.known = current;
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};

    fn write_wav(path: &Path, rate: u32, samples: &[i16]) {
        let spec = WavSpec {
            channels: 1,
            sample_rate: rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = FileInput::open("/nonexistent/stream.wav").unwrap_err();
        assert!(matches!(err, InputError::SourceNotFound(_)));
    }

    #[test]
    fn reads_and_normalizes_int_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, 8000, &[16384; 32]);

        let mut input = FileInput::open(path.to_str().unwrap()).unwrap();
        assert_eq!(input.sample_rate(), 8000);

        let mut buf = [0.0f32; 64];
        let n = input.read_chunk(&mut buf).unwrap();
        assert_eq!(n, 32);
        assert!(buf[..n].iter().all(|&s| (s - 0.5).abs() < 1e-4));

        // Exhausted on the next read.
        assert_eq!(input.read_chunk(&mut buf).unwrap(), 0);
    }

    #[test]
    fn out_of_range_bit_depth_is_rejected_at_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.wav");

        // Hand-built PCM header claiming 64 bits per sample, outside what
        // the integer scaler can shift. hound is not trusted to catch it.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&36u32.to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
        bytes.extend_from_slice(&8000u32.to_le_bytes()); // sample rate
        bytes.extend_from_slice(&64000u32.to_le_bytes()); // byte rate
        bytes.extend_from_slice(&8u16.to_le_bytes()); // block align
        bytes.extend_from_slice(&64u16.to_le_bytes()); // bits per sample
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&0u32.to_le_bytes());
        fs::write(&path, &bytes).unwrap();

        // Either our guard or the decoder refuses; it must never panic in
        // the sample scaler.
        let err = FileInput::open(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(
            err,
            InputError::UnsupportedFormat(_) | InputError::Decode(_)
        ));
    }

    #[test]
    fn mixes_stereo_to_mono() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        let spec = WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for _ in 0..16 {
            writer.write_sample(16384i16).unwrap(); // left: 0.5
            writer.write_sample(0i16).unwrap(); // right: 0.0
        }
        writer.finalize().unwrap();

        let mut input = FileInput::open(path.to_str().unwrap()).unwrap();
        let mut buf = [0.0f32; 32];
        let n = input.read_chunk(&mut buf).unwrap();
        assert_eq!(n, 16);
        assert!(buf[..n].iter().all(|&s| (s - 0.25).abs() < 1e-4));
    }

    #[test]
    fn watcher_reports_appearing_and_disappearing_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut watcher = FileWatcher::new(dir.path().to_str().unwrap()).unwrap();
        assert!(watcher.poll().unwrap().is_empty());

        let path = dir.path().join("a.wav");
        write_wav(&path, 8000, &[0; 8]);
        let events = watcher.poll().unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], ChannelEvent::Appeared(name) if name.ends_with("a.wav")));

        // Stable set yields no events.
        assert!(watcher.poll().unwrap().is_empty());

        fs::remove_file(&path).unwrap();
        let events = watcher.poll().unwrap();
        assert!(matches!(&events[0], ChannelEvent::Disappeared(name) if name.ends_with("a.wav")));
    }

    #[test]
    fn watcher_rejects_missing_directory() {
        let err = FileWatcher::new("/nonexistent/watch-dir").unwrap_err();
        assert!(matches!(err, InputError::SourceNotFound(_)));
    }
}
