//! Flattens the HTML fragment of the content slot into blocks egui can lay
//! out. Only headings, paragraphs and line breaks carry meaning, any other
//! tag is dropped and its text kept.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Text(String),
}

pub fn fragment_blocks(html: &str) -> Vec<Block> {
    let mut blocks = vec![];
    let mut text = String::new();
    let mut heading = false;
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        text.push_str(&rest[..start]);
        let Some(end) = rest[start..].find('>') else {
            // unterminated tag, keep it as text
            text.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let tag = rest[start + 1..start + end].trim().to_ascii_lowercase();
        rest = &rest[start + end + 1..];

        let name = tag
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default();
        let is_heading = matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6");
        let breaks = is_heading || matches!(name, "p" | "div" | "br" | "li" | "ul" | "ol");
        if breaks {
            flush(&mut blocks, &mut text, heading);
        }
        if is_heading {
            heading = !tag.starts_with('/');
        }
    }
    text.push_str(rest);
    flush(&mut blocks, &mut text, heading);
    blocks
}

fn flush(blocks: &mut Vec<Block>, text: &mut String, heading: bool) {
    let line = decode_entities(&text.split_whitespace().collect::<Vec<_>>().join(" "));
    text.clear();
    if line.is_empty() {
        return;
    }
    blocks.push(if heading {
        Block::Heading(line)
    } else {
        Block::Text(line)
    });
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
