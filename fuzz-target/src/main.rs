#[macro_use]
extern crate afl;
extern crate nmea0183;

use nmea0183::{FixedLinearBuffer, LineBuffer, Message, NmeaProcessor, ProcessOutcome};

const GGA: &[u8] =
    b"\n$GPGGA,115739.00,4158.8441367,N,09147.4416929,W,4,13,0.9,255.747,M,-32.00,M,01,0000*6E\r\n";

fn process(bufsize: usize, chunksize: usize, data: &[u8]) {
    let mut buf = vec![0; bufsize];
    let mut lines = LineBuffer::new(FixedLinearBuffer::new(&mut buf[..]));
    let mut processor = NmeaProcessor::with_standard_decoders();
    for chunk in data.chunks(chunksize) {
        // lines.consume adds the chunk to its internal buffer, and
        // returns an iterator-like object we can use to process the lines
        let mut it = lines.consume(chunk);
        loop {
            match it.next() {
                Some(Ok(line)) => {
                    processor.process_sentence(line);
                }
                Some(Err(_)) => {}
                None => {
                    // We've eaten all the lines we have
                    break;
                }
            }
        }
    }

    // The leading newline ends whatever partial line the input left behind
    let mut num_fixes = 0;
    {
        let mut it = lines.consume(GGA);
        while let Some(line) = it.next() {
            if let Ok(line) = line {
                if let ProcessOutcome::Decoded(Message::Gga(_)) = processor.process_sentence(line) {
                    num_fixes += 1;
                }
            }
        }
    }
    // The input itself may end in a complete GGA missing only its newline
    assert!(num_fixes >= 1);
    assert!(lines.is_buffer_empty());

    let stats = processor.stats();
    assert_eq!(
        stats.received,
        stats.decoded
            + stats.pending
            + stats.ignored
            + stats.checksum_errors
            + stats.malformed
            + stats.decode_failures
    );
}

fn main() {
    fuzz!(|data: &[u8]| {
        if data.len() > 2 {
            let bufsize = 96 + data[0] as usize;
            let chunksize = data[1] as usize;
            if chunksize != 0 {
                process(bufsize, chunksize, &data[2..]);
            }
        }
    });
}
