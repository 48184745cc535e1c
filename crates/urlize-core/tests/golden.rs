use std::fs;
use std::path::{Path, PathBuf};
use urlize_core::{urlize_trunc, whitelineless};

const TRIM_LIMIT: usize = 50;

#[test]
fn golden_log_fixtures() -> Result<(), Box<dyn std::error::Error>> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let fixtures_dir = root.join("tests/fixtures");
    let expect_dir = root.join("tests/expect");

    let mut fixtures = collect_fixtures(&fixtures_dir, "txt")?;
    fixtures.sort_by(|a, b| file_name(a).cmp(&file_name(b)));
    assert!(!fixtures.is_empty(), "no log fixtures found");

    for fixture in fixtures {
        let name = file_stem(&fixture)?;
        let source = fs::read_to_string(&fixture)?;
        let html = source
            .lines()
            .map(|line| urlize_trunc(line, TRIM_LIMIT).into_string())
            .collect::<Vec<_>>()
            .join("\n");

        let expected = fs::read_to_string(expect_dir.join(format!("{}.html", name)))?;
        assert_eq!(
            html.trim_end(),
            expected.trim_end(),
            "HTML mismatch for fixture {}",
            name
        );
    }

    Ok(())
}

#[test]
fn golden_template_fixtures() -> Result<(), Box<dyn std::error::Error>> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let fixtures_dir = root.join("tests/fixtures");
    let expect_dir = root.join("tests/expect");

    let mut fixtures = collect_fixtures(&fixtures_dir, "tmpl")?;
    fixtures.sort_by(|a, b| file_name(a).cmp(&file_name(b)));

    for fixture in fixtures {
        let name = file_stem(&fixture)?;
        let source = fs::read_to_string(&fixture)?;
        let html = whitelineless(&source)?;

        let expected = fs::read_to_string(expect_dir.join(format!("{}.html", name)))?;
        assert_eq!(
            html.trim_end(),
            expected.trim_end(),
            "HTML mismatch for template {}",
            name
        );
    }

    Ok(())
}

fn collect_fixtures(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut fixtures = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some(extension) {
            fixtures.push(path);
        }
    }
    Ok(fixtures)
}

fn file_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("")
}

fn file_stem(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(|value| value.to_string())
        .ok_or_else(|| "fixture name is not valid UTF-8".into())
}
