use std::io;
use std::io::ErrorKind;

use markdown::{CompileOptions, Options, ParseOptions};

/// GFM to HTML. Raw HTML in the source (include placeholders, iframes, author
/// snippets) is passed through untouched.
pub fn render_markdown(md_text: &str) -> io::Result<String> {
    let options = Options {
        parse: ParseOptions::gfm(),
        compile: CompileOptions {
            allow_dangerous_html: true,
            allow_dangerous_protocol: true,
            gfm_tagfilter: false,
            ..CompileOptions::gfm()
        },
    };

    match markdown::to_html_with_options(md_text, &options) {
        Ok(x) => Ok(x),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, e.reason.as_str())),
    }
}
