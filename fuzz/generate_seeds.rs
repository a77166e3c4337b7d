#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(bit_depth: u16, compression: u32, fs70_subtype: Option<u8>, payload: usize) -> Vec<u8> {
    let header_len = if fs70_subtype.is_some() { 74 } else { 54 };
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((header_len + payload) as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&(header_len as u32).to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&4u32.to_le_bytes()); // width
    out.extend_from_slice(&4u32.to_le_bytes()); // height
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&bit_depth.to_le_bytes());
    out.extend_from_slice(&compression.to_le_bytes());
    out.extend_from_slice(&(payload as u32).to_le_bytes());
    out.extend_from_slice(&[0; 16]);
    if let Some(subtype) = fs70_subtype {
        out.extend_from_slice(b"FS70");
        out.extend_from_slice(&20u32.to_le_bytes());
        out.push(0);
        out.push(subtype);
        out.extend_from_slice(&[0; 10]);
    }
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    let seeds: [(&str, u16, &[u8; 4], Option<u8>, usize); 5] = [
        ("std24_4x4.bmp", 24, &[0; 4], None, 48),
        ("fs32_4x4.bmp", 32, &[0; 4], Some(4), 64),
        ("dxt1_alpha_4x4.bmp", 16, b"DXT1", Some(2), 8),
        ("dxt3_4x4.bmp", 16, b"DXT3", Some(4), 16),
        ("dxt5_4x4.bmp", 16, b"DXT5", Some(4), 16),
    ];
    for (name, depth, fourcc, subtype, len) in seeds {
        let mut data = header(depth, u32::from_le_bytes(*fourcc), subtype, len);
        data.extend((0..len).map(|i| (i * 37) as u8));
        fs::write(format!("{dir}/{name}"), data).unwrap();
    }

    let corpus = fs::read_dir(dir).unwrap().count();
    eprintln!("wrote {corpus} seeds to {dir}");
    fs::create_dir_all("fuzz/corpus/fuzz_transcode").unwrap();
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        fs::copy(&path, format!("fuzz/corpus/fuzz_transcode/{}", path.file_name().unwrap().to_string_lossy())).unwrap();
    }
}
