use criterion::{criterion_group, criterion_main, Criterion};
use nmea0183::*;

static EPOCH: &str = "\
$GPGGA,092750.000,5321.6802,N,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,*76\r
$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39\r
$GPGSV,3,1,11,03,03,111,00,04,15,270,00,06,01,010,00,13,06,292,00*74\r
$GPGSV,3,2,11,14,25,170,00,16,57,208,39,18,67,296,40,19,40,246,00*74\r
$GPGSV,3,3,11,22,42,067,42,24,14,311,43,27,05,244,00,,,,*4D\r
$GPRMC,092750.000,A,5321.6802,N,00630.3372,W,0.02,31.66,280511,,,A*43\r
$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K,A*25\r
$GPGLL,4916.45,N,12311.12,W,225444,V,N*44\r
";

fn process_all<T: UnderlyingBuffer>(
    mut lines: LineBuffer<T>,
    processor: &mut NmeaProcessor,
    data: &[u8],
    chunk_size: usize,
) -> usize {
    let mut count = 0;
    for chunk in data.chunks(chunk_size) {
        let mut it = lines.consume(chunk);
        loop {
            match it.next() {
                Some(Ok(line)) => {
                    if processor.process_sentence(line).is_decoded() {
                        count += 1;
                    }
                },
                Some(Err(e)) => {
                    panic!("No errors allowed! got: {:?}", e);
                },
                None => {
                    // We've eaten all the lines we have
                    break;
                },
            }
        }
    }
    count
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let data = EPOCH.repeat(100);

    c.bench_function("tokenize_gga", |b| {
        b.iter(|| {
            Sentence::parse(
                "$GPGGA,092750.000,5321.6802,N,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,*76",
            )
            .is_ok()
        })
    });

    for chunk in &[16, 64, 256, 1024] {
        c.bench_function(&format!("vec_process_epochs_{}", chunk), |b| {
            b.iter(|| {
                let mut processor = NmeaProcessor::with_standard_decoders();
                let lines = LineBuffer::default();
                assert_eq!(process_all(lines, &mut processor, data.as_bytes(), *chunk), 600);
            })
        });
    }
    for (buf_size, chunk) in &[(128, 16), (128, 64), (256, 256), (256, 1024)] {
        let mut underlying = vec![0; *buf_size];
        c.bench_function(&format!("array_process_epochs_{}_{}", buf_size, chunk), |b| {
            b.iter(|| {
                let mut processor = NmeaProcessor::with_standard_decoders();
                let lines = LineBuffer::new(FixedLinearBuffer::new(&mut underlying[..]));
                assert_eq!(process_all(lines, &mut processor, data.as_bytes(), *chunk), 600);
            })
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
