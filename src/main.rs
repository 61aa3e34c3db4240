use std::collections::BTreeMap;
use std::env;

use swf_codec::swf::format::tags::Tag;
use swf_codec::{ScreenVideoFrame, SwfFile};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <path-to-swf-file>", args[0]);
        std::process::exit(1);
    }

    let swf_path = &args[1];
    println!("Reading SWF file: {}", swf_path);
    println!("{}", "=".repeat(60));

    let mut file = match SwfFile::open(swf_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("\nERROR: Failed to read SWF file");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    println!("\nMovie Information:");
    println!("  Signature: {:?}", file.header.file.signature);
    println!("  Version: {}", file.header.file.version);
    println!("  Declared length: {} bytes", file.header.file.file_length);
    println!("  Stage: {:?}", file.header.frame.frame_size);
    println!("  Frame rate: {} fps", file.header.frame.frame_rate.to_f32());
    println!("  Frame count: {}", file.header.frame.frame_count);

    let mut census: BTreeMap<u16, usize> = BTreeMap::new();
    let mut first_video_seen = false;
    for result in file.tags() {
        let tag = match result {
            Ok(tag) => tag,
            Err(e) => {
                eprintln!("\nERROR: Failed to read tag stream");
                eprintln!("  {}", e);
                std::process::exit(1);
            }
        };
        *census.entry(tag.code()).or_insert(0) += 1;
        if let Tag::VideoFrame(video) = &tag {
            if !first_video_seen {
                first_video_seen = true;
                match ScreenVideoFrame::decode(&video.video_data) {
                    Ok(frame) => {
                        println!("\nFirst Video Frame (stream {}):", video.stream_id);
                        println!("  Kind: {:?}", frame.kind);
                        println!("  Image: {}x{}", frame.image_width, frame.image_height);
                        println!(
                            "  Blocks: {}x{} tiles of {}x{}",
                            frame.columns(),
                            frame.rows(),
                            frame.block_width,
                            frame.block_height
                        );
                    }
                    Err(e) => println!("\nFirst video frame is not Screen Video: {}", e),
                }
            }
        }
    }

    println!("\nTag Census:");
    for (code, count) in &census {
        println!("  code {:>4}: {} tag(s)", code, count);
    }
}
