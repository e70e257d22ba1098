use crate::domain::model::ModelQuery;
use regex::Regex;

/// 判斷文中是否提到完全相同的型號
///
/// 大小寫不敏感。若型號後面緊接著英數字（"HD800" 出現在 "HD800S" 裡），
/// 該次出現不算命中；只要有一次出現後面是空白、標點或字串結尾即成立。
/// 查詢本身若是變體（"HD800S"），同樣規則套用在完整字串上，不會退回較短的前綴。
pub fn matches(post_text: &str, base_name: &str) -> bool {
    match ModelQuery::new(base_name) {
        Ok(query) => !boundary_offsets(query.variant_pattern(), post_text).is_empty(),
        Err(_) => false,
    }
}

impl ModelQuery {
    /// 完整名稱比對；多字查詢找不到時，改以型號字詞比對
    pub fn matches(&self, text: &str) -> bool {
        !self.positions(text).is_empty()
    }

    /// 所有被接受的出現位置（字元位置）
    pub fn positions(&self, text: &str) -> Vec<usize> {
        let exact = boundary_offsets(self.variant_pattern(), text);
        if !exact.is_empty() {
            return exact;
        }

        match self.model_pattern() {
            Some(pattern) => boundary_offsets(pattern, text),
            None => exact,
        }
    }
}

fn boundary_offsets(pattern: &Regex, text: &str) -> Vec<usize> {
    pattern
        .captures_iter(text)
        .filter(|caps| caps.name("suffix").is_some_and(|suffix| suffix.is_empty()))
        .filter_map(|caps| caps.name("name"))
        .map(|m| char_offset(text, m.start()))
        .collect()
}

pub(crate) fn char_offset(text: &str, byte_index: usize) -> usize {
    text[..byte_index].chars().count()
}
