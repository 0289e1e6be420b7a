//! Prompt construction
//!
//! Pure, deterministic functions turning an item plus a content kind into
//! the system and user prompts. No I/O.

use curator_core::{CatalogItem, ContentKind};

/// Build the system prompt for one generation.
///
/// Conversation requests get a fixed guide persona grounded in the stored
/// generated description. Everything else composes a historian persona from
/// the item's attributes plus a kind-specific instruction.
pub fn build_system_prompt(item: &CatalogItem, kind: ContentKind) -> String {
    if kind == ContentKind::Conversation {
        return "You are an expert conversational museum guide. Use the stored generated \
                description for this object as your primary source of facts to answer the \
                user's question, and be concise."
            .to_string();
    }

    let mut base = format!(
        "You are an expert aerospace historian and museum guide. \
         You are helping visitors learn about {}, a {}",
        item.name, item.kind
    );

    if let Some(category) = non_empty(item.category.as_deref()) {
        base.push_str(&format!(" in the {} category", category));
    }

    if let Some(era) = non_empty(item.era.as_deref()) {
        base.push_str(&format!(" from the {}", era));
    }

    match kind {
        ContentKind::Description => {
            base + ". Provide a detailed, engaging description that would captivate museum visitors."
        }
        ContentKind::Story => {
            base + ". Tell an interesting story or historical narrative about this object that would engage visitors."
        }
        ContentKind::Facts => {
            base + ". Share fascinating facts and technical details that would educate visitors."
        }
        ContentKind::Conversation | ContentKind::Other => {
            base + ". Provide helpful information about this object."
        }
    }
}

/// Build the user prompt for one generation.
///
/// When a specific request is present and a generated description is cached,
/// the prompt collapses to a context/question pair answered purely from the
/// cached summary, which keeps prompt size down.
pub fn build_user_prompt(
    item: &CatalogItem,
    kind: ContentKind,
    specific_request: Option<&str>,
) -> String {
    let specific_request = non_empty(specific_request);
    let generated = non_empty(item.generated_description.as_deref());

    if let Some(request) = specific_request {
        if let Some(description) = generated {
            return format!("CONTEXT: {}\n\nUSER QUESTION: {}", description, request);
        }
        return format!("{}\n\nSpecific request: {}", base_info(item), request);
    }

    let mut info = base_info(item);

    if kind == ContentKind::Conversation {
        if let Some(description) = generated {
            info.push_str(&format!(
                "\n\nPrimary Source (Generated Description): {}",
                description
            ));
        }
    }

    match kind {
        ContentKind::Description => {
            info + "\n\nGenerate an engaging description for museum visitors."
        }
        ContentKind::Story => info + "\n\nTell an interesting story about this object.",
        ContentKind::Facts => info + "\n\nShare fascinating facts about this object.",
        ContentKind::Conversation => {
            info + "\n\nAnswer the user's question based on the provided information."
        }
        ContentKind::Other => info + "\n\nProvide information about this object.",
    }
}

/// Structured informational block naming the item's attributes.
fn base_info(item: &CatalogItem) -> String {
    let mut info = format!("Object: {}\nType: {}", item.name, item.kind);

    if let Some(category) = non_empty(item.category.as_deref()) {
        info.push_str(&format!("\nCategory: {}", category));
    }
    if let Some(era) = non_empty(item.era.as_deref()) {
        info.push_str(&format!("\nEra: {}", era));
    }
    if let Some(manufacturer) = non_empty(item.manufacturer.as_deref()) {
        info.push_str(&format!("\nManufacturer: {}", manufacturer));
    }
    if let Some(description) = non_empty(item.description.as_deref()) {
        info.push_str(&format!("\nCurrent Description: {}", description));
    }

    info
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ============================================================================
// UNIT TESTS
// ============================================================================
