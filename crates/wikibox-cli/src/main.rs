use anyhow::{Context, Result, bail};
use std::io::{self, Read, Write};
use std::{env, process};
use wikibox_config::Config;
use wikibox_engine::{XhtmlHost, render_document};

const USAGE: &str = "Usage: wikibox [--standalone] [--section-edit] <file|->";

/// Command-line options, layered over the config file.
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    input: String,
    standalone: bool,
    section_edit: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut input = None;
    for arg in args {
        match arg.as_str() {
            "--standalone" => options.standalone = true,
            "--section-edit" => options.section_edit = true,
            flag if flag.starts_with("--") => bail!("Unknown option: {flag}"),
            path => {
                if input.replace(path.to_string()).is_some() {
                    bail!("Only one input file may be given");
                }
            }
        }
    }
    options.input = input.context("No input file given")?;
    Ok(options)
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))
    }
}

/// Wraps rendered markup in a minimal XHTML page.
fn standalone_page(body: &str, config: &Config) -> String {
    let title = html_escape::encode_text(config.title.as_deref().unwrap_or("wikibox"));
    let stylesheet = config
        .stylesheet
        .as_ref()
        .map(|path| {
            let href = html_escape::encode_double_quoted_attribute(&path.to_string_lossy())
                .into_owned();
            format!("<link rel=\"stylesheet\" type=\"text/css\" href=\"{href}\" />\n")
        })
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" \
         \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\">\n\
         <html xmlns=\"http://www.w3.org/1999/xhtml\">\n<head>\n\
         <meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\" />\n\
         <title>{title}</title>\n{stylesheet}</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

fn run(args: &[String]) -> Result<()> {
    let options = parse_args(args)?;

    let mut config = match Config::load() {
        Ok(Some(config)) => {
            log::info!("Loaded config from {}", Config::config_path().display());
            config
        }
        Ok(None) => {
            log::info!("No config file found, using defaults");
            Config::default()
        }
        Err(e) => {
            log::warn!("Ignoring config file: {e}");
            Config::default()
        }
    };
    config.standalone |= options.standalone;
    config.section_edit |= options.section_edit;

    let text = read_input(&options.input)?;
    let mut host = XhtmlHost::new().with_section_edit(config.section_edit);
    let body = render_document(&text, &mut host)
        .with_context(|| format!("Failed to render {}", options.input))?;
    log::info!(
        "Rendered {} ({} editable sections)",
        options.input,
        host.sections().len()
    );

    let output = if config.standalone {
        standalone_page(&body, &config)
    } else {
        body
    };
    io::stdout()
        .write_all(output.as_bytes())
        .context("Failed to write output")?;
    Ok(())
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        eprintln!("{USAGE}");
        process::exit(1);
    }
}
