//! World-building prompts and response parsing.
//!
//! Generation runs in two phases. The first asks for a numbered list of
//! `Category: Description` topics sized to the story's target length; the
//! second expands each topic into a paragraph followed by a `Keywords:` line.
//! Parsing is tolerant: lines and responses that do not follow the requested
//! format degrade instead of failing.

use storyloom_core::story::{Story, WorldBuilderEntry};

/// Marker that introduces the keyword list in an elaboration response.
pub const KEYWORDS_MARKER: &str = "Keywords:";

/// Number of topics to request for a story of `target_length` words:
/// three, plus one per thousand words, plus one more per ten thousand.
#[must_use]
pub fn entry_count(target_length: u32) -> usize {
    3 + (target_length / 1000) as usize + (target_length / 10_000) as usize
}

/// Builds the phase-one prompt asking for `count` topics.
#[must_use]
pub fn topics_prompt(story: &Story, count: usize) -> String {
    format!(
        "Based on the following story idea, generate a list of {count} world-building topics. \
         For each topic, provide a category and a single, evocative sentence describing it.\n\
         \n\
         Story Prompt: {prompt}\n\
         Main Character: {character}\n\
         World Guide: {guide}\n\
         Genre/Tone: {genre}, {tone}\n\
         \n\
         Format your response as a numbered list. Each item should be a 'Category: Description'.\n\
         Example:\n\
         1. Magic System: A system based on celestial alignments, where power waxes and wanes with the moon.\n\
         2. Political Structure: A council of five merchant guilds secretly controls the city-state from the shadows.\n",
        prompt = story.prompt,
        character = story.main_character_desc,
        guide = story.world_guide,
        genre = story.genre,
        tone = story.tone,
    )
}

/// Parses a phase-one response into entries. Lines without a colon are
/// skipped.
#[must_use]
pub fn parse_topics(text: &str) -> Vec<WorldBuilderEntry> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_topic_line)
        .collect()
}

fn parse_topic_line(line: &str) -> Option<WorldBuilderEntry> {
    let (category, description) = line.split_once(':')?;
    let category = strip_numbering(category.trim());
    if category.is_empty() {
        return None;
    }
    Some(WorldBuilderEntry::new(category, description.trim()))
}

/// Removes a leading `N.` list marker.
fn strip_numbering(category: &str) -> &str {
    let rest = category.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == category.len() {
        return category;
    }
    rest.strip_prefix('.').map_or(category, str::trim_start)
}

/// Builds the phase-two prompt for one entry.
#[must_use]
pub fn elaboration_prompt(entry: &WorldBuilderEntry) -> String {
    format!(
        "You are a creative world-building assistant. Take the following topic and expand it \
         into a detailed, interesting paragraph. Then, provide exactly 4 comma-separated \
         keywords relevant to the entry.\n\
         \n\
         Topic: {category}\n\
         Initial Idea: {description}\n\
         \n\
         Format your response as follows:\n\
         [Detailed paragraph]\n\
         {KEYWORDS_MARKER} keyword1, keyword2, keyword3, keyword4\n",
        category = entry.category,
        description = entry.description,
    )
}

/// The parsed content of a phase-two response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elaboration {
    /// Paragraph preceding the keyword marker.
    pub description: String,
    /// Keywords following the marker; empty if the marker was missing.
    pub keywords: Vec<String>,
}

/// Splits a phase-two response on the last keyword marker. Without a marker
/// the whole response becomes the description.
#[must_use]
pub fn parse_elaboration(text: &str) -> Elaboration {
    match text.rsplit_once(KEYWORDS_MARKER) {
        Some((description, keywords)) => Elaboration {
            description: description.trim().to_owned(),
            keywords: keywords
                .split(',')
                .map(str::trim)
                .filter(|keyword| !keyword.is_empty())
                .map(str::to_owned)
                .collect(),
        },
        None => Elaboration {
            description: text.trim().to_owned(),
            keywords: Vec::new(),
        },
    }
}
