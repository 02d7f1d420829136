use std::{
    ffi::OsString,
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use hyperram_cfg_core::{write_output, HyperRamCfgError, HyperRamParams};
use log::info;

/// Generates the instructions for `params` and writes them to `output_path`.
///
/// The output is first written next to the target and then renamed over it,
/// so a failed run never leaves a half written file behind.
pub fn generate<P: AsRef<Path>>(
    params: &HyperRamParams,
    output_path: &P,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_path = output_path.as_ref();

    let instructions = hyperram_cfg_core::generate(params)?;

    let tmp_path = tmp_path_for(output_path)?;

    let result = File::create(&tmp_path)
        .map_err(HyperRamCfgError::FailedToWrite)
        .and_then(|output| write_output(&instructions, BufWriter::new(output)))
        .and_then(|()| fs::rename(&tmp_path, output_path).map_err(HyperRamCfgError::FailedToWrite));

    if let Err(err) = result {
        if tmp_path.exists() {
            fs::remove_file(&tmp_path)?;
        }
        return Err(Box::new(err));
    }

    info!(
        "Configuration instructions written to {}",
        output_path.display()
    );

    Ok(())
}

fn tmp_path_for(output_path: &Path) -> Result<PathBuf, HyperRamCfgError> {
    let file_name = output_path.file_name().ok_or_else(|| {
        HyperRamCfgError::InvalidParameter(format!(
            "output path '{}' does not name a file",
            output_path.display()
        ))
    })?;

    let mut tmp_name = OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(".tmp");

    Ok(output_path.with_file_name(tmp_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hyperram-cfg-{}-{}", std::process::id(), name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn params() -> HyperRamParams {
        HyperRamParams {
            hyperram_size: 0x100_0000,
            which_phy: 0,
            phys_in_use: 2,
            address_space: 0,
            cfg_base_addr: 0x4000_0000,
            memory_base_addr: 0x8000_0000,
            chip_count: 4,
            t_latency_access: 6,
        }
    }

    #[test]
    fn writes_instructions_to_file() {
        let dir = scratch_dir("writes");
        let output = dir.join("hyperram_config.txt");

        generate(&params(), &output).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            include_str!("../../hyperram-cfg-core/tests/golden/four_chips_dual_phy.txt")
        );
        assert!(!dir.join(".hyperram_config.txt.tmp").exists());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = scratch_dir("overwrites");
        let output = dir.join("hyperram_config.txt");
        fs::write(&output, "stale contents that are longer than nothing\n".repeat(20)).unwrap();

        generate(&params(), &output).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("mww 0x40000000 0x6\n"));
        assert!(!written.contains("stale"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let dir = scratch_dir("repeat");
        let first = dir.join("first.txt");
        let second = dir.join("second.txt");

        generate(&params(), &first).unwrap();
        generate(&params(), &second).unwrap();

        assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_directory_fails_without_leftovers() {
        let dir = scratch_dir("missing");
        let output = dir.join("does-not-exist").join("hyperram_config.txt");

        assert!(generate(&params(), &output).is_err());
        assert!(!output.exists());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn invalid_params_leave_existing_file_untouched() {
        let dir = scratch_dir("invalid");
        let output = dir.join("hyperram_config.txt");
        fs::write(&output, "previous\n").unwrap();

        let params = HyperRamParams {
            chip_count: 0,
            ..params()
        };
        assert!(generate(&params, &output).is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous\n");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn tmp_file_sits_next_to_output() {
        assert_eq!(
            tmp_path_for(Path::new("out/board.txt")).unwrap(),
            PathBuf::from("out/.board.txt.tmp")
        );
        assert!(tmp_path_for(Path::new("..")).is_err());
    }
}
