//! Generation request assembly: free-text instructions plus the response schema.
//!
//! The prose is advisory; the schema is what actually constrains the shape of the
//! model's JSON.

use serde_json::{json, Value};

use crate::blueprint::{
  GeneratorConfig, COMPETENCY_PERCENT, EXAM_TIME, EXAM_TITLE, MCQ_PER_SUBJECT, SUBJECTIVE_TIERS,
};
use crate::domain::Subject;
use crate::syllabus;

/// Instructions for one paper. The year is embedded; the set is not, the model
/// never sees it and it is stamped onto the result afterwards.
pub fn build_instructions(cfg: &GeneratorConfig, year: &str) -> String {
  let context = if *cfg == GeneratorConfig::default() {
    syllabus::syllabus_context().to_string()
  } else {
    syllabus::render_context(cfg)
  };
  let d = &cfg.difficulty_distribution;
  let life_first = MCQ_PER_SUBJECT + 1;
  let mcq_total = 2 * MCQ_PER_SUBJECT;

  let mut tiers = String::new();
  for subject in Subject::ALL {
    tiers.push_str(&format!(
      "       - {} ({} marks):\n",
      subject.label(),
      crate::blueprint::subjective_marks_per_subject()
    ));
    for t in SUBJECTIVE_TIERS {
      tiers.push_str(&format!(
        "         * {} questions of {} marks each (Internal OR choice).\n",
        t.count, t.marks
      ));
    }
  }

  format!(
    r#"
{context}

    Create a comprehensive Mock Test Question Paper for **{EXAM_TITLE}**.

    Strict Requirements:
    1. **Language**: The entire content MUST be in ODIA language script.
    2. **Year**: The exam year is **{year}**.
    3. **Title**: "{EXAM_TITLE}".
    4. **Time**: "{EXAM_TIME}".
    5. **Section A (Objective)**:
       - Generate exactly {MCQ_PER_SUBJECT} MCQs for Physical Science (Q1-Q{MCQ_PER_SUBJECT}).
       - Generate exactly {MCQ_PER_SUBJECT} MCQs for Life Science (Q{life_first}-Q{mcq_total}).
       - Every MCQ has exactly 4 options labelled A, B, C, D and one correctOption label.
       - **COMPETENCY RULE**: At least {COMPETENCY_PERCENT}% of these questions must be competency-based. These should be longer, scenario-based, or involve critical thinking, not just direct recall. Make the options detailed where necessary.
    6. **Section B (Subjective)**:
{tiers}       - **MIXED CHAPTER RULE**: For every subjective question with an internal "OR" choice, the alternative question MUST be from a DIFFERENT chapter than the main question to test broader knowledge.

    Ensure the difficulty level is balanced as requested ({}% Easy, {}% Moderate, {}% Difficult).
"#,
    d.easy, d.moderate, d.difficult,
  )
}

fn subject_enum() -> Value {
  json!({ "type": "STRING", "enum": Subject::ALL.iter().map(|s| s.label()).collect::<Vec<_>>() })
}

fn mcq_schema() -> Value {
  json!({
    "type": "OBJECT",
    "properties": {
      "id": { "type": "STRING" },
      "questionNumber": { "type": "INTEGER" },
      "questionText": { "type": "STRING" },
      "options": {
        "type": "ARRAY",
        "items": {
          "type": "OBJECT",
          "properties": {
            "label": { "type": "STRING" },
            "text": { "type": "STRING" }
          },
          "required": ["label", "text"]
        }
      },
      "correctOption": { "type": "STRING" },
      "subject": subject_enum()
    },
    "required": ["questionNumber", "questionText", "options", "correctOption", "subject"]
  })
}

fn subjective_schema() -> Value {
  json!({
    "type": "OBJECT",
    "properties": {
      "id": { "type": "STRING" },
      "questionNumber": { "type": "INTEGER" },
      "questionText": { "type": "STRING" },
      "marks": { "type": "INTEGER" },
      "hasInternalChoice": { "type": "BOOLEAN" },
      "alternativeQuestionText": { "type": "STRING" },
      "subject": subject_enum()
    },
    "required": ["questionNumber", "questionText", "marks", "hasInternalChoice", "subject"]
  })
}

fn section_schema(items: Value) -> Value {
  json!({
    "type": "OBJECT",
    "properties": {
      "physicalScience": { "type": "ARRAY", "items": items.clone() },
      "lifeScience": { "type": "ARRAY", "items": items }
    },
    "required": ["physicalScience", "lifeScience"]
  })
}

/// Response schema for a whole `QuestionPaper`, in Gemini's `responseSchema` dialect.
/// `year` and `set` are deliberately absent: they are stamped client-side.
pub fn paper_schema() -> Value {
  json!({
    "type": "OBJECT",
    "properties": {
      "title": { "type": "STRING" },
      "fullMarks": { "type": "INTEGER" },
      "time": { "type": "STRING" },
      "sectionA": section_schema(mcq_schema()),
      "sectionB": section_schema(subjective_schema())
    },
    "required": ["title", "fullMarks", "time", "sectionA", "sectionB"]
  })
}
