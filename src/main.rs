use std::env;

use wav_reader::WavReader;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <path-to-wav-file>", args[0]);
        std::process::exit(1);
    }

    let wav_path = &args[1];

    println!("Reading WAVE file: {}", wav_path);
    println!("{}", "=".repeat(60));

    match WavReader::new(wav_path) {
        Ok(reader) => {
            let format_name = match reader.audio_format() {
                0x0001 => " (PCM)",
                0x0003 => " (IEEE float)",
                _ => "",
            };

            println!("\nAudio Format:");
            println!("  Format code:  {:#06x}{}", reader.audio_format(), format_name);
            println!("  Channels:     {}", reader.num_channels());
            println!("  Sample rate:  {} Hz", reader.sample_rate());
            println!("  Bits/sample:  {}", reader.bits_per_sample());

            if let Some(data) = reader.data() {
                println!("\nSample Data:");
                println!("  {} bytes of raw samples", data.size);
            }

            if let Some(fact) = reader.fact() {
                println!("\nFact:");
                println!("  {} samples per channel", fact.sample_count);
            }

            if let Some(cue) = reader.cue() {
                println!("\nCue Points ({}):", cue.declared_count);
                for (i, point) in cue.points.iter().enumerate() {
                    println!(
                        "  {}. id={} position={} sample_offset={}",
                        i + 1,
                        point.identifier,
                        point.position,
                        point.sample_offset
                    );
                }
            } else {
                println!("\nNo cue points found in this file.");
            }
        }
        Err(e) => {
            eprintln!("\nERROR: Failed to read WAVE file");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
