/// huff – round-trip smoke harness for the huff library.
///
/// Builds a Huffman tree from its input, encodes that same input, decodes
/// the result, and verifies the round trip:
///   huff file.txt ...    → report on each file
///   huff -s "some text"  → report on a literal string
///   huff                 → report on a builtin sample
use std::env;
use std::fs;
use std::process::ExitCode;

use huff::frequency::get_frequency;
use huff::HuffmanTree;

fn usage() {
    eprintln!("huff - static Huffman coding smoke harness");
    eprintln!();
    eprintln!("Usage: huff [OPTIONS] [FILE]...");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --string TEXT  Use TEXT as the input instead of a file");
    eprintln!("  -h, --help         Show this help");
    eprintln!();
    eprintln!("With no input, a builtin sample is used. For each input the");
    eprintln!("harness builds a tree, encodes, decodes, and checks that the");
    eprintln!("decoded bytes match the original.");
}

/// Encode and decode one input, reporting stats. Returns false on any
/// failure, including a round-trip mismatch.
fn run(label: &str, input: &[u8]) -> bool {
    let freq = get_frequency(input);
    let tree = match HuffmanTree::from_frequency_table(&freq) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("huff: {label}: {err}");
            return false;
        }
    };
    let encoded = match tree.encode(input) {
        Ok(encoded) => encoded,
        Err(err) => {
            eprintln!("huff: {label}: {err}");
            return false;
        }
    };
    let decoded = match tree.decode(&encoded) {
        Ok(decoded) => decoded,
        Err(err) => {
            eprintln!("huff: {label}: {err}");
            return false;
        }
    };
    if decoded != input {
        eprintln!("huff: {label}: round-trip mismatch");
        return false;
    }

    let bits_per_symbol = encoded.bit_len() as f32 / input.len() as f32;
    let ratio = 100.0 * encoded.byte_len() as f32 / input.len() as f32;
    println!(
        "{label}: {} bytes in, {} bytes out ({} bits), round-trip ok",
        input.len(),
        encoded.byte_len(),
        encoded.bit_len()
    );
    println!(
        "  {} distinct symbols, entropy {:.3} bits/symbol, code {:.3} bits/symbol, ratio {:.1}%",
        freq.used,
        freq.entropy(),
        bits_per_symbol,
        ratio
    );
    true
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut inputs: Vec<(String, Vec<u8>)> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                usage();
                return ExitCode::SUCCESS;
            }
            "-s" | "--string" => {
                i += 1;
                let Some(text) = args.get(i) else {
                    eprintln!("huff: {} requires an argument", args[i - 1]);
                    return ExitCode::FAILURE;
                };
                inputs.push(("<string>".into(), text.clone().into_bytes()));
            }
            arg if arg.starts_with('-') => {
                eprintln!("huff: unknown option {arg}");
                usage();
                return ExitCode::FAILURE;
            }
            path => match fs::read(path) {
                Ok(data) => inputs.push((path.to_string(), data)),
                Err(err) => {
                    eprintln!("huff: {path}: {err}");
                    return ExitCode::FAILURE;
                }
            },
        }
        i += 1;
    }

    if inputs.is_empty() {
        inputs.push(("<sample>".into(), b"testing!".to_vec()));
    }

    let mut ok = true;
    for (label, data) in &inputs {
        ok &= run(label, data);
    }
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
