//! Prompt templates for academic summarization.

use crate::types::LengthSelector;

/// Role given to the model out of band.
pub const SYSTEM_INSTRUCTION: &str = "أنت خبير أكاديمي متخصص في تحليل وتلخيص الأبحاث العلمية باللغة العربية. مهمتك هي إنتاج ملخص احترافي ودقيق، يسلط الضوء على النقاط الجوهرية، والمنهجية المتبعة، وأهم النتائج والاستنتاجات، مع الحفاظ الكامل على هيكل البحث الأصلي وعناوينه.";

/// Rules every summary must follow, independent of length.
pub const ACADEMIC_POLICY: &str = r#"يجب أن تلتزم بالقواعد التالية بدقة عند إعداد ملخص أكاديمي احترافي للنص البحثي التالي:
1.  **الحفاظ على العناوين**: حافظ على جميع عناوين الأقسام الأصلية (مثل: المقدمة، المنهجية، النتائج، الخاتمة) دون أي تعديل، حذف، أو إعادة صياغة.
2.  **التركيز على الجوهر**: تحت كل عنوان، قدم تلخيصًا موجزًا ومركزًا للفقرات التي تليه، مستخلصًا الأفكار الرئيسية، الحجج الأساسية، البيانات الهامة، والنتائج الرئيسية فقط.
3.  **اللغة الأكاديمية**: استخدم لغة عربية فصحى، رصينة، وموضوعية.
4.  **الحيادية**: تجنب إضافة أي معلومات، تفسيرات، أو آراء غير موجودة في النص الأصلي.
5.  **التسلسل المنطقي**: تأكد من أن الملخص الناتج يحافظ على التسلسل المنطقي والهيكل العام للبحث الأصلي."#;

/// Separates the instructions from the document body.
pub const TEXT_DELIMITER: &str = "النص المراد تلخيصه:\n---";

/// Build the user prompt for a document at the given length.
///
/// The input text is appended verbatim after [`TEXT_DELIMITER`].
pub fn build_summary_prompt(text: &str, length: LengthSelector) -> String {
    format!(
        "{}\n\n{}\n\n{}\n{}",
        length.instruction(),
        ACADEMIC_POLICY,
        TEXT_DELIMITER,
        text
    )
}
