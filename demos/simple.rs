use std::{env, fs};

use av1_obu_parser::{get_next_obu, parse_sequence_header, ObuType};

fn main() {
    let path = env::args().nth(1).expect("usage: simple <input.obu>");
    let data = fs::read(path).expect("failed to read input file");

    let mut pos = 0usize;
    while pos < data.len() {
        let frame = match get_next_obu(&data[pos..]) {
            Ok(frame) => frame,
            Err(err) => {
                eprintln!("parse error at byte {pos}: {err}");
                break;
            }
        };

        println!(
            "{:?} temporal_id={} spatial_id={} payload={}..{}",
            frame.obu_type,
            frame.temporal_id,
            frame.spatial_id,
            pos + frame.offset,
            pos + frame.offset + frame.size
        );

        if frame.obu_type == ObuType::SequenceHeader {
            let payload = &data[pos + frame.offset..pos + frame.offset + frame.size];
            match parse_sequence_header(payload) {
                Ok(seq) => println!("{seq:#?}"),
                Err(err) => eprintln!("sequence header parse error: {err}"),
            }
        }

        pos += frame.offset + frame.size;
    }
}
