use anyhow::Result;
use log::{info, warn};
use nmea0183::{
    GgaDecoder, GllDecoder, GnssFix, GsaDecoder, GsvDecoder, LineBuffer, Message, NmeaProcessor,
    ProcessOutcome, RmcDecoder, SatellitesInView, VtgDecoder,
};

mod cli;

const READ_CHUNK_LEN: usize = 1024;

fn main() -> Result<()> {
    let matches = cli::command().get_matches();

    env_logger::Builder::new()
        .filter_level(cli::log_level(&matches))
        .parse_env("NMEA_LOGLEVEL")
        .init();

    let json = matches.get_flag("json");
    let mut source = cli::Source::open(&matches)?;
    let mut processor = processor()?;
    let mut lines = LineBuffer::default();
    let mut buf = [0; READ_CHUNK_LEN];

    while let Some(nbytes) = source.read(&mut buf)? {
        let mut it = lines.consume(&buf[..nbytes]);
        loop {
            match it.next() {
                Some(Ok(line)) => {
                    if let ProcessOutcome::Decoded(message) = processor.process_sentence(line) {
                        print_message(&message, json)?;
                    }
                },
                Some(Err(e)) => {
                    warn!("Malformed line, ignore it; cause {e}");
                },
                None => {
                    break;
                },
            }
        }
    }

    let stats = processor.stats();
    info!(
        "{} sentences: {} decoded, {} pending, {} ignored, {} checksum errors, {} malformed, {} decode failures",
        stats.received,
        stats.decoded,
        stats.pending,
        stats.ignored,
        stats.checksum_errors,
        stats.malformed,
        stats.decode_failures,
    );
    Ok(())
}

fn processor() -> Result<NmeaProcessor> {
    let mut gga = GgaDecoder::new();
    gga.on_position(|fix: &GnssFix| {
        if !fix.has_fix() {
            info!("{} GGA without fix", fix.talker);
        }
    });
    let mut rmc = RmcDecoder::new();
    rmc.on_position(|fix: &GnssFix| {
        if let Some(timestamp) = fix.timestamp() {
            info!("{} receiver time {timestamp}", fix.talker);
        }
    });
    let mut gsv = GsvDecoder::new();
    gsv.on_satellites_in_view(|view: &SatellitesInView| {
        let tracked = view.satellites.iter().filter(|sat| sat.snr.is_some()).count();
        info!(
            "{} tracking {tracked} of {} satellites in view",
            view.talker.system_name(),
            view.satellites.len()
        );
    });

    let mut processor = NmeaProcessor::new();
    processor.register_decoder(gga)?;
    processor.register_decoder(GllDecoder::new())?;
    processor.register_decoder(rmc)?;
    processor.register_decoder(GsaDecoder::new())?;
    processor.register_decoder(gsv)?;
    processor.register_decoder(VtgDecoder::new())?;
    Ok(processor)
}

fn print_message(message: &Message, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(message)?);
    } else {
        println!("{:?}", message);
    }
    Ok(())
}
