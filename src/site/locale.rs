//! Locale tag → Open Graph locale (`language_TERRITORY`) mapping.

/// Used for any tag the table does not cover.
pub const DEFAULT_OG_LOCALE: &str = "en_US";

/// Lowercased tag → Open Graph locale. Region-specific tags come first so
/// they win over the language-only fallback.
const OG_LOCALES: &[(&str, &str)] = &[
    ("en-gb", "en_GB"),
    ("en-au", "en_AU"),
    ("en-ca", "en_CA"),
    ("pt-br", "pt_BR"),
    ("pt-pt", "pt_PT"),
    ("es-mx", "es_MX"),
    ("es-419", "es_LA"),
    ("fr-ca", "fr_CA"),
    ("zh-hans", "zh_CN"),
    ("zh-hant", "zh_TW"),
    ("zh-tw", "zh_TW"),
    ("zh-hk", "zh_HK"),
    ("en", "en_US"),
    ("ru", "ru_RU"),
    ("uk", "uk_UA"),
    ("be", "be_BY"),
    ("kk", "kk_KZ"),
    ("de", "de_DE"),
    ("fr", "fr_FR"),
    ("es", "es_ES"),
    ("it", "it_IT"),
    ("pt", "pt_PT"),
    ("nl", "nl_NL"),
    ("pl", "pl_PL"),
    ("cs", "cs_CZ"),
    ("sk", "sk_SK"),
    ("hu", "hu_HU"),
    ("ro", "ro_RO"),
    ("bg", "bg_BG"),
    ("el", "el_GR"),
    ("sv", "sv_SE"),
    ("da", "da_DK"),
    ("fi", "fi_FI"),
    ("nb", "nb_NO"),
    ("no", "nb_NO"),
    ("et", "et_EE"),
    ("lv", "lv_LV"),
    ("lt", "lt_LT"),
    ("tr", "tr_TR"),
    ("ar", "ar_AR"),
    ("he", "he_IL"),
    ("fa", "fa_IR"),
    ("hi", "hi_IN"),
    ("th", "th_TH"),
    ("vi", "vi_VN"),
    ("id", "id_ID"),
    ("ms", "ms_MY"),
    ("ja", "ja_JP"),
    ("ko", "ko_KR"),
    ("zh", "zh_CN"),
    ("ka", "ka_GE"),
    ("hy", "hy_AM"),
    ("az", "az_AZ"),
    ("uz", "uz_UZ"),
];

/// Open Graph locale for a locale tag.
///
/// Looks up the full tag, then its language subtag, case-insensitively.
pub fn og_locale(tag: &str) -> &'static str {
    let lower = tag.to_ascii_lowercase();
    let language = lower.split('-').next().unwrap_or_default();

    lookup(&lower)
        .or_else(|| lookup(language))
        .unwrap_or(DEFAULT_OG_LOCALE)
}

fn lookup(key: &str) -> Option<&'static str> {
    OG_LOCALES
        .iter()
        .find(|(tag, _)| *tag == key)
        .map(|(_, og)| *og)
}
