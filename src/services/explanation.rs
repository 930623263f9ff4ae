//! Prompts for the text-generation collaborator and validation of its answers
//!
//! The generator output is untrusted: every answer is parsed against the JSON
//! shape the prompt asked for, and anything else becomes
//! `AppError::MalformedResponse`.

use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::{
        ClothingItem, ExplanationRequest, ExplanationResponse, Outfit, OutfitWithDataRequest,
        OutfitWithDataResponse,
    },
    services::providers::TextGenerator,
};

/// Renders the stylist prompt used to justify an already chosen outfit
pub fn render_explanation_prompt(request: &ExplanationRequest) -> String {
    let mut prompt = format!(
        "Eres un estilista personal explicando por qué un atuendo es adecuado para el clima y el estilo seleccionado.\n\n\
         La temperatura es {} grados Celsius.\n\
         El estilo seleccionado es {}.\n\
         El atuendo consiste en los siguientes elementos: {}.\n",
        request.temperature_celsius,
        request.style,
        request.outfit.join(", ")
    );

    if let Some(closet) = request.user_closet.as_deref().filter(|c| !c.trim().is_empty()) {
        prompt.push_str(&format!(
            "\nConsidera que el armario del usuario contiene los siguientes elementos: {}.\n",
            closet
        ));
    }

    prompt.push_str(
        "\nExplica por qué este atuendo es adecuado para el clima y el estilo. \
         Ten en cuenta las tendencias de la moda actuales y los principios generales de estilo.\n\
         Responde en formato JSON con la clave \"explanation\".",
    );

    prompt
}

/// Renders the prompt that lets the generator pick the outfit among `clothing_items`
pub fn render_outfit_with_data_prompt(request: &OutfitWithDataRequest) -> String {
    let items: String = request
        .clothing_items
        .iter()
        .map(|item| {
            format!(
                "- {} (categoría: {}, estilos: {})\n",
                item.name,
                item.category,
                item.applicable_styles.join(", ")
            )
        })
        .collect();

    format!(
        "Eres un estilista personal.\n\
         La temperatura es {} grados Celsius.\n\
         El estilo seleccionado es {}.\n\
         Tienes las siguientes prendas disponibles:\n{}\
         Genera una sugerencia de atuendo adecuada para la temperatura y el estilo, utilizando solo las prendas proporcionadas.\n\
         Proporciona una justificación para la sugerencia de atuendo, teniendo en cuenta las tendencias de la moda y los principios de estilo.\n\
         Responde en formato JSON con las claves \"outfitSuggestion\" (un array de objetos con nombre e imagen_url) y \"justification\".",
        request.temperature_celsius, request.style, items
    )
}

/// Drops a surrounding Markdown code fence, which some models add even in JSON mode
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => trimmed,
    }
}

fn parse_response<T: DeserializeOwned>(text: &str) -> AppResult<T> {
    serde_json::from_str(strip_code_fence(text)).map_err(|e| {
        tracing::warn!(error = %e, "Generator answer does not match the expected schema");
        AppError::MalformedResponse(format!("Unexpected generator answer: {}", e))
    })
}

/// Parses an explanation answer; an empty explanation counts as malformed
pub fn parse_explanation(text: &str) -> AppResult<String> {
    let response: ExplanationResponse = parse_response(text)?;
    let explanation = response.explanation.trim();

    if explanation.is_empty() {
        return Err(AppError::MalformedResponse(
            "Generator returned an empty explanation".to_string(),
        ));
    }

    Ok(explanation.to_string())
}

/// Asks the generator why `outfit` suits the temperature and style
pub async fn request_explanation(
    generator: &dyn TextGenerator,
    temperature_celsius: f64,
    style: &str,
    outfit: &Outfit,
    closet_description: Option<&str>,
) -> AppResult<String> {
    let request = ExplanationRequest {
        temperature_celsius,
        style: style.to_string(),
        outfit: outfit.item_names(),
        user_closet: closet_description.map(str::to_string),
    };

    tracing::info!(
        temperature = temperature_celsius,
        style = %style,
        items = request.outfit.len(),
        generator = generator.name(),
        "Requesting outfit explanation"
    );

    let answer = generator
        .generate_json(&render_explanation_prompt(&request))
        .await?;

    parse_explanation(&answer)
}

/// Lets the generator choose the outfit among `candidates` and justify it
///
/// The answer is only checked for shape here; whether the suggested names
/// exist among the candidates is up to the caller.
pub async fn generate_outfit_with_data(
    generator: &dyn TextGenerator,
    temperature_celsius: f64,
    style: &str,
    candidates: &[&ClothingItem],
) -> AppResult<OutfitWithDataResponse> {
    let request = OutfitWithDataRequest {
        temperature_celsius,
        style: style.to_string(),
        clothing_items: candidates.iter().map(|&item| item.clone()).collect(),
    };

    tracing::info!(
        temperature = temperature_celsius,
        style = %style,
        candidates = candidates.len(),
        generator = generator.name(),
        "Requesting outfit suggestion"
    );

    let answer = generator
        .generate_json(&render_outfit_with_data_prompt(&request))
        .await?;

    parse_response(&answer)
}
