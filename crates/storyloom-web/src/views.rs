//! HTML rendering for the browser-facing pages.

use axum::http::StatusCode;
use storyloom_core::story::GenerationPhase;
use storyloom_story::application::query_handlers::StoryView;

/// Escapes text for inclusion in HTML element content and attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} - Storyloom</title>\n\
         </head>\n\
         <body>\n\
         <header><a href=\"/\">Storyloom</a></header>\n\
         <main>\n{body}</main>\n\
         </body>\n\
         </html>\n",
        title = escape(title),
    )
}

/// The story submission form.
#[must_use]
pub fn index_page() -> String {
    let body = "<h1>Story Generator</h1>\n\
        <form method=\"post\" action=\"/\">\n\
        <label for=\"prompt\">Story prompt</label>\n\
        <textarea id=\"prompt\" name=\"prompt\" rows=\"4\" required></textarea>\n\
        <label for=\"main_character_desc\">Main character</label>\n\
        <textarea id=\"main_character_desc\" name=\"main_character_desc\" rows=\"3\"></textarea>\n\
        <label for=\"target_length\">Target length (words)</label>\n\
        <input id=\"target_length\" name=\"target_length\" type=\"number\" min=\"1\" value=\"5000\" required>\n\
        <label for=\"world_guide\">World guide</label>\n\
        <textarea id=\"world_guide\" name=\"world_guide\" rows=\"3\"></textarea>\n\
        <label for=\"genre\">Genre</label>\n\
        <input id=\"genre\" name=\"genre\" type=\"text\">\n\
        <label for=\"tone\">Tone</label>\n\
        <input id=\"tone\" name=\"tone\" type=\"text\">\n\
        <label for=\"style\">Style</label>\n\
        <input id=\"style\" name=\"style\" type=\"text\">\n\
        <button type=\"submit\">Generate</button>\n\
        </form>\n";
    layout("Story Generator", body)
}

fn phase_label(phase: GenerationPhase) -> &'static str {
    match phase {
        GenerationPhase::NotStarted => "Not started",
        GenerationPhase::TopicsGenerated => "Topics generated",
        GenerationPhase::Elaborated => "Complete",
    }
}

/// The story page: premise, world-building entries, and any outline or
/// characters.
#[must_use]
pub fn story_page(story: &StoryView) -> String {
    let mut body = String::new();

    body.push_str(&format!(
        "<h1>Your Story</h1>\n\
         <section class=\"premise\">\n\
         <p><strong>Prompt:</strong> {prompt}</p>\n\
         <p><strong>Main character:</strong> {character}</p>\n\
         <p><strong>Target length:</strong> {length} words</p>\n\
         <p><strong>World guide:</strong> {guide}</p>\n\
         <p><strong>Genre:</strong> {genre} <strong>Tone:</strong> {tone} <strong>Style:</strong> {style}</p>\n\
         <p class=\"phase\">Generation: {phase}</p>\n\
         </section>\n",
        prompt = escape(&story.prompt),
        character = escape(&story.main_character_desc),
        length = story.target_length,
        guide = escape(&story.world_guide),
        genre = escape(&story.genre),
        tone = escape(&story.tone),
        style = escape(&story.style),
        phase = phase_label(story.phase),
    ));

    body.push_str("<section class=\"world-builder\">\n<h2>World Builder</h2>\n");
    if story.world_builder.is_empty() {
        body.push_str("<p>No world-building entries were generated.</p>\n");
    }
    for entry in &story.world_builder {
        body.push_str(&format!(
            "<article class=\"entry\">\n<h3>{}</h3>\n<p>{}</p>\n",
            escape(&entry.category),
            escape(&entry.description),
        ));
        if !entry.keywords.is_empty() {
            body.push_str("<ul class=\"keywords\">\n");
            for keyword in &entry.keywords {
                body.push_str(&format!("<li>{}</li>\n", escape(keyword)));
            }
            body.push_str("</ul>\n");
        }
        body.push_str("</article>\n");
    }
    body.push_str("</section>\n");

    if !story.story_outline.is_empty() {
        body.push_str(&format!(
            "<section class=\"outline\">\n<h2>Outline</h2>\n<p>{}</p>\n</section>\n",
            escape(&story.story_outline),
        ));
    }

    if !story.characters.is_empty() {
        body.push_str("<section class=\"characters\">\n<h2>Characters</h2>\n");
        for character in &story.characters {
            body.push_str(&format!(
                "<article class=\"character\">\n<h3>{} ({})</h3>\n<p>{}</p>\n</article>\n",
                escape(&character.name),
                escape(&character.role),
                escape(&character.description),
            ));
        }
        body.push_str("</section>\n");
    }

    layout("Your Story", &body)
}

/// An error page for `status`.
#[must_use]
pub fn error_page(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<h1>{code} {reason}</h1>\n<p>{message}</p>\n<p><a href=\"/\">Start a new story</a></p>\n",
        code = status.as_u16(),
        message = escape(message),
    );
    layout(reason, &body)
}
