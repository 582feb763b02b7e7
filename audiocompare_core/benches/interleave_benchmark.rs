use std::f32::consts::TAU;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use audiocompare_core::{
    interleave, run, sample_to_bytes, ChannelFormat, ChannelInput, Config, Endianness, WordWidth,
};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use tempfile::TempDir;

struct SyntheticCapture {
    _dir: TempDir,
    path: PathBuf,
}

impl SyntheticCapture {
    fn new(
        file_name: &str,
        format: ChannelFormat,
        sample_rate: u32,
        seconds: u32,
        frequency: f32,
    ) -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(file_name);
        write_sine_wave(&path, format, sample_rate, seconds, frequency)?;
        Ok(Self { _dir: dir, path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

fn sine_samples(format: ChannelFormat, sample_rate: u32, seconds: u32, frequency: f32) -> Vec<i32> {
    let total = seconds as usize * sample_rate as usize;
    let full_scale = ((1i64 << format.width.sign_bit()) - 1) as f32;
    let amplitude = full_scale * 0.6;

    (0..total)
        .map(|n| {
            let t = n as f32 / sample_rate as f32;
            (amplitude * (frequency * TAU * t).sin()) as i32
        })
        .collect()
}

fn encode(samples: &[i32], format: ChannelFormat) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * format.width.bytes());
    for &sample in samples {
        bytes.extend_from_slice(sample_to_bytes(sample, format).as_slice());
    }
    bytes
}

fn write_sine_wave(
    path: &Path,
    format: ChannelFormat,
    sample_rate: u32,
    seconds: u32,
    frequency: f32,
) -> io::Result<()> {
    let samples = sine_samples(format, sample_rate, seconds, frequency);
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(&encode(&samples, format))?;
    file.flush()
}

struct Scenario {
    name: &'static str,
    left: ChannelFormat,
    right: ChannelFormat,
}

fn channel_format(width: u8, endianness: Endianness) -> ChannelFormat {
    ChannelFormat::new(
        WordWidth::new(width).expect("benchmark widths are valid"),
        endianness,
    )
}

fn scenarios() -> [Scenario; 3] {
    [
        Scenario {
            name: "le16_le16",
            left: channel_format(2, Endianness::Little),
            right: channel_format(2, Endianness::Little),
        },
        Scenario {
            name: "be24_le16",
            left: channel_format(3, Endianness::Big),
            right: channel_format(2, Endianness::Little),
        },
        Scenario {
            name: "le32_be8",
            left: channel_format(4, Endianness::Little),
            right: channel_format(1, Endianness::Big),
        },
    ]
}

fn in_memory_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("interleave_in_memory");

    for scenario in scenarios() {
        let left = encode(&sine_samples(scenario.left, 48_000, 2, 440.0), scenario.left);
        let right = encode(&sine_samples(scenario.right, 48_000, 2, 523.25), scenario.right);
        group.throughput(Throughput::Elements(48_000 * 2));
        group.bench_with_input(
            BenchmarkId::from_parameter(scenario.name),
            &scenario,
            |b, scenario| {
                b.iter(|| {
                    interleave(
                        left.as_slice(),
                        scenario.left,
                        right.as_slice(),
                        scenario.right,
                        io::sink(),
                    )
                    .expect("interleave failed")
                });
            },
        );
    }

    group.finish();
}

fn file_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("interleave_files");

    for scenario in scenarios() {
        let left = SyntheticCapture::new("left.pcm", scenario.left, 44_100, 10, 440.0)
            .expect("failed to synthesize left capture");
        let right = SyntheticCapture::new("right.pcm", scenario.right, 44_100, 9, 440.0)
            .expect("failed to synthesize right capture");

        group.bench_with_input(
            BenchmarkId::from_parameter(scenario.name),
            &scenario,
            |b, scenario| {
                b.iter_batched(
                    || {
                        let output = tempfile::tempdir().expect("failed to create output dir");
                        let config = Config::new(
                            ChannelInput::new(left.path(), scenario.left),
                            ChannelInput::new(right.path(), scenario.right),
                            output.path().join("stereo.raw"),
                        )
                        .expect("failed to build config");
                        (config, output)
                    },
                    |(config, _output)| {
                        run(config).expect("conversion failed");
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, in_memory_benchmarks, file_benchmarks);
criterion_main!(benches);
