//! Advanced SubStation Alpha subtitle files.

use std::fmt::Write;
use storyreel_interface::CaptionEvent;

fn ass_time(seconds: f64) -> String {
    let centis = (seconds.max(0.0) * 100.0).round() as u64;
    format!(
        "{}:{:02}:{:02}.{:02}",
        centis / 360_000,
        (centis / 6_000) % 60,
        (centis / 100) % 60,
        centis % 100
    )
}

fn ass_text(text: &str) -> String {
    text.replace('{', "(")
        .replace('}', ")")
        .replace('\n', "\\N")
}

/// Render caption events as an ASS document.
///
/// Captions are bold white with a black outline, centered in the frame.
/// Layout coordinates are the video's own resolution.
///
/// # Examples
///
/// ```
/// use storyreel_interface::CaptionEvent;
/// use storyreel_media::render_ass;
///
/// let events = vec![CaptionEvent { start: 0.0, end: 1.25, text: "Once upon".into() }];
/// let doc = render_ass(&events, 576, 1024, "Arial", 64);
/// assert!(doc.contains("Dialogue: 0,0:00:00.00,0:00:01.25,Default,,0,0,0,,Once upon"));
/// ```
pub fn render_ass(
    events: &[CaptionEvent],
    width: u32,
    height: u32,
    font: &str,
    font_size: u32,
) -> String {
    let mut doc = String::new();
    let _ = write!(
        doc,
        "[Script Info]\n\
         ScriptType: v4.00+\n\
         PlayResX: {width}\n\
         PlayResY: {height}\n\
         WrapStyle: 0\n\
         ScaledBorderAndShadow: yes\n\
         \n\
         [V4+ Styles]\n\
         Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding\n\
         Style: Default,{font},{font_size},&H00FFFFFF,&H00FFFFFF,&H00000000,&H00000000,-1,0,0,0,100,100,0,0,1,3,0,5,20,20,20,1\n\
         \n\
         [Events]\n\
         Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n"
    );
    for event in events {
        let _ = writeln!(
            doc,
            "Dialogue: 0,{},{},Default,,0,0,0,,{}",
            ass_time(event.start),
            ass_time(event.end),
            ass_text(&event.text)
        );
    }
    doc
}
