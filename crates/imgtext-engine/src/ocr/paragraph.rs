//! Paragraph grouping of recognized lines.

use imgtext_protocol::RecognizedLine;

/// Merge adjacent lines into paragraphs.
///
/// A line joins the paragraph above it when the vertical gap to the previous
/// line is at most half that line's height and the two lines overlap
/// horizontally, or come within one line-height of each other. Merged text
/// is joined with a single space and the box becomes the union of both.
/// Lines without geometry never merge. Blank lines are dropped.
pub fn group_paragraphs(lines: Vec<RecognizedLine>) -> Vec<RecognizedLine> {
    let mut paragraphs: Vec<RecognizedLine> = Vec::new();
    let mut previous: Option<RecognizedLine> = None;

    for line in lines {
        if line.text.trim().is_empty() {
            continue;
        }

        let joins = previous
            .as_ref()
            .is_some_and(|prev| continues_paragraph(prev, &line));

        match paragraphs.last_mut() {
            Some(paragraph) if joins => merge_into(paragraph, &line),
            _ => paragraphs.push(line.clone()),
        }

        previous = Some(line);
    }

    paragraphs
}

fn continues_paragraph(prev: &RecognizedLine, next: &RecognizedLine) -> bool {
    if prev.height <= 0 || next.height <= 0 {
        return false;
    }

    let gap = next.y - prev.bottom();
    if gap * 2 > prev.height || gap < -prev.height {
        return false;
    }

    next.x <= prev.right() + prev.height && next.right() >= prev.x - prev.height
}

fn merge_into(paragraph: &mut RecognizedLine, line: &RecognizedLine) {
    let left = paragraph.x.min(line.x);
    let top = paragraph.y.min(line.y);
    let right = paragraph.right().max(line.right());
    let bottom = paragraph.bottom().max(line.bottom());

    paragraph.text = format!("{} {}", paragraph.text.trim_end(), line.text.trim_start());
    paragraph.x = left;
    paragraph.y = top;
    paragraph.width = right - left;
    paragraph.height = bottom - top;
}
