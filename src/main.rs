use clap::{arg, crate_version, Command};
use std::path::Path;
use dspack::archive;

const RCH: &str = "unreachable was reached";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let long_help = "Examples:
---------
Extract:       `dspack archive.bin` writes archive.lst and archive/
Rebuild:       `dspack archive.lst` writes archive.bin";

    let matches = Command::new("dspack")
        .about("Extract and rebuild DS-style compressed archives")
        .after_long_help(long_help)
        .version(crate_version!())
        .arg(arg!(<input> "input path, a `.bin` archive extracts, anything else rebuilds"))
        .arg(arg!([output] "output path, defaults to the input with its extension swapped"))
        .get_matches();

    let in_name = matches.get_one::<String>("input").expect(RCH);
    let stem = &in_name[0..in_name.rfind('.').unwrap_or(in_name.len())];
    let extract = in_name.rfind(".bin").is_some();
    let out_name = match matches.get_one::<String>("output") {
        Some(name) => name.clone(),
        None => match extract {
            true => format!("{}.lst", stem),
            false => format!("{}.bin", stem)
        }
    };

    if extract {
        archive::extract_file(Path::new(in_name), Path::new(&out_name))
    } else {
        archive::rebuild_file(Path::new(in_name), Path::new(&out_name))
    }
}
