/// Build the masking instruction sent to the text-generation provider.
pub fn build_mask_prompt(text: &str) -> String {
    format!(
        "Identify and mask any remaining private PII in the following text.\n\
         Replace personal names with <NAME_1>, <NAME_2>, etc.\n\
         Replace IDs (any sequence of digits longer than 3) with <ID_1>, <ID_2>, etc.\n\
         Replace any other private detail with <KIND_N>, where KIND is a short uppercase tag.\n\
         Do NOT mask publicly known people, companies, organisations, products, or landmarks.\n\
         Tokens that already look like <KIND_N> are masked already: keep them exactly as they are.\n\
         Return *only* JSON with two fields: `masked_text` (the masked text) and `mapping` \
         (an object from each new placeholder to the original text it replaced). \
         No commentary, no code fences.\n\n\
         Text:\n'''{text}'''"
    )
}
