#![cfg(feature = "serde")]

use nmea0183::{FixQuality, Message, NmeaProcessor, Talker};

#[test]
fn test_serialize_gga_fix() {
    let message = NmeaProcessor::with_standard_decoders()
        .process_sentence(
            "$GPGGA,115739.00,4158.8441367,N,09147.4416929,W,4,13,0.9,255.747,M,-32.00,M,01,0000*6E",
        )
        .into_message()
        .unwrap();

    let json = serde_json::to_value(&message).unwrap();
    let fix = &json["Gga"];
    assert_eq!(fix["talker"], "Gps");
    assert_eq!(fix["quality"], "RtkFixed");
    assert_eq!(fix["satellites_used"], 13);
    assert_eq!(fix["time"], "11:57:39");
    assert!((fix["position"]["lat"].as_f64().unwrap() - 41.98073561).abs() < 1e-6);

    let back: Message = serde_json::from_value(json).unwrap();
    assert_eq!(back.sentence_id(), "GGA");
    assert_eq!(back.fix().and_then(|fix| fix.quality), Some(FixQuality::RtkFixed));
}

#[test]
fn test_serialize_satellites_in_view() {
    let message = NmeaProcessor::with_standard_decoders()
        .process_sentence("$GPGSV,1,1,01,07,79,048,42*4B")
        .into_message()
        .unwrap();

    let json = serde_json::to_string(&message).unwrap();
    assert_eq!(
        json,
        r#"{"Gsv":{"talker":"Gps","in_view":1,"satellites":[{"prn":7,"elevation":79,"azimuth":48,"snr":42}]}}"#
    );
}

#[test]
fn test_deserialize_unknown_values() {
    let quality: FixQuality = serde_json::from_str(r#"{"Unknown":9}"#).unwrap();
    assert_eq!(quality, FixQuality::Unknown(9));
    let talker: Talker = serde_json::from_str(r#"{"Other":"PG"}"#).unwrap();
    assert_eq!(talker, Talker::Other("PG".into()));
}
