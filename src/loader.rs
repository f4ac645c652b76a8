/// # loader
///
/// Programs are plain text, one byte per line as a binary literal:
///
/// ```text
/// # print8.ls8
/// 10000010 # LDI R0,8
/// 00000000
/// 00001000
/// ```
///
/// Anything after `#` is a comment. Lines left empty once comments are
/// stripped are skipped.
use crate::error::LoadError;
use crate::memory::LS8_RAM_SIZE_BYTES;
use std::fs;
use std::path::Path;

/// read and parse a program file
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let program = parse_program(&text)?;
    log::info!("loaded {} bytes from {}", program.len(), path.display());
    Ok(program)
}

/// parse program text into the bytes to be written from address 0
pub fn parse_program(text: &str) -> Result<Vec<u8>, LoadError> {
    let mut program = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let literal = line.split('#').next().unwrap_or("").trim();
        if literal.is_empty() {
            continue;
        }
        program.push(parse_byte(literal).ok_or_else(|| LoadError::Parse {
            line: i + 1,
            text: literal.to_string(),
        })?);
    }
    if program.len() > LS8_RAM_SIZE_BYTES {
        return Err(LoadError::ProgramTooLarge { len: program.len() });
    }
    Ok(program)
}

// from_str_radix alone would also take a leading '+'
fn parse_byte(literal: &str) -> Option<u8> {
    if literal.len() > 8 || !literal.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    u8::from_str_radix(literal, 2).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_print8() -> Result<(), LoadError> {
        let prog = parse_program(include_str!("../programs/print8.ls8"))?;
        assert_eq!(prog, vec![0x82, 0x00, 0x08, 0x47, 0x00, 0x01]);
        Ok(())
    }

    #[test]
    fn test_comments_and_blank_lines() -> Result<(), LoadError> {
        let text = "# header\n\n   \n00000001   # HLT\n  10000010\n#00000000\n";
        assert_eq!(parse_program(text)?, vec![0x01, 0x82]);
        Ok(())
    }

    #[test]
    fn test_short_literal_accepted() -> Result<(), LoadError> {
        assert_eq!(parse_program("101\n")?, vec![5]);
        Ok(())
    }

    #[test]
    fn test_bad_literal_reports_line() {
        match parse_program("00000001\n\n0000000x # oops\n") {
            Err(LoadError::Parse { line, text }) => {
                assert_eq!(line, 3);
                assert_eq!(text, "0000000x");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_wide_and_signed_literals() {
        assert!(matches!(
            parse_program("100000000"),
            Err(LoadError::Parse { .. })
        ));
        assert!(matches!(parse_program("+1"), Err(LoadError::Parse { .. })));
    }

    #[test]
    fn test_too_large() {
        let text = "00000000\n".repeat(257);
        assert!(matches!(
            parse_program(&text),
            Err(LoadError::ProgramTooLarge { len: 257 })
        ));
    }

    #[test]
    fn test_missing_file() {
        match load_file("programs/does_not_exist.ls8") {
            Err(e @ LoadError::Io { .. }) => assert_eq!(e.exit_code(), 2),
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn test_all_sample_programs_parse() -> Result<(), LoadError> {
        for (name, text, len) in [
            ("mult", include_str!("../programs/mult.ls8"), 12),
            ("stack", include_str!("../programs/stack.ls8"), 31),
            ("call", include_str!("../programs/call.ls8"), 30),
            ("sctest", include_str!("../programs/sctest.ls8"), 66),
        ] {
            assert_eq!(parse_program(text)?.len(), len, "{}", name);
        }
        Ok(())
    }
}
