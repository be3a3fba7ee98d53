use cloak_core::models::SearchHit;

/// Answer prompt built from the masked query and the search hits. Only
/// masked text ever reaches this function.
pub fn build_answer_prompt(masked_query: &str, hits: &[SearchHit]) -> String {
    let mut prompt = String::from(
        "Answer the user's question using the web search results below.\n\
         Tokens of the form <KIND_N> (for example <NAME_1> or <EMAIL_2>) stand in for \
         private details: copy them into your answer exactly as written, never guess \
         what they hide, and never invent new ones.\n\
         Cite sources as [n] when you use them.\n\n",
    );

    if hits.is_empty() {
        prompt.push_str("Search results: none found.\n");
    } else {
        prompt.push_str("Search results:\n");
        for (i, hit) in hits.iter().enumerate() {
            prompt.push_str(&format!(
                "[{}] {}\n    {}\n    {}\n",
                i + 1,
                hit.title,
                hit.url,
                hit.snippet
            ));
        }
    }

    prompt.push_str(&format!("\nQuestion: {masked_query}\nAnswer:"));
    prompt
}
