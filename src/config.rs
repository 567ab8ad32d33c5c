//! Compiled-in constants for the platform keyboard.
//!
//! The bridge stores and forwards input-type and flag values without
//! interpreting them; these catalogs exist so embedders do not have to
//! hardcode platform numbers. Validation patterns are reference data for
//! embedder-side checks and are never enforced here.

/// Input-type class and variation bits, as defined by the platform's
/// editor-info contract. Combine one class with one variation.
pub mod input_types {
    /// Plain text input.
    pub const TYPE_CLASS_TEXT: i32 = 0x00000001;
    /// Numeric input.
    pub const TYPE_CLASS_NUMBER: i32 = 0x00000002;
    /// Phone-number input.
    pub const TYPE_CLASS_PHONE: i32 = 0x00000003;
    /// Date or time input.
    pub const TYPE_CLASS_DATETIME: i32 = 0x00000004;

    /// Ordinary text, no specialization.
    pub const TYPE_TEXT_VARIATION_NORMAL: i32 = 0x00000000;
    /// A URI.
    pub const TYPE_TEXT_VARIATION_URI: i32 = 0x00000010;
    /// An email address.
    pub const TYPE_TEXT_VARIATION_EMAIL_ADDRESS: i32 = 0x00000020;
    /// An email subject line.
    pub const TYPE_TEXT_VARIATION_EMAIL_SUBJECT: i32 = 0x00000030;
    /// A short free-form message.
    pub const TYPE_TEXT_VARIATION_SHORT_MESSAGE: i32 = 0x00000040;
    /// A long free-form message.
    pub const TYPE_TEXT_VARIATION_LONG_MESSAGE: i32 = 0x00000050;
    /// A person's name.
    pub const TYPE_TEXT_VARIATION_PERSON_NAME: i32 = 0x00000060;
    /// A postal address.
    pub const TYPE_TEXT_VARIATION_POSTAL_ADDRESS: i32 = 0x00000070;
    /// A password; input is concealed.
    pub const TYPE_TEXT_VARIATION_PASSWORD: i32 = 0x00000080;
    /// A password the user asked to see.
    pub const TYPE_TEXT_VARIATION_VISIBLE_PASSWORD: i32 = 0x00000090;
    /// Text inside a web form.
    pub const TYPE_TEXT_VARIATION_WEB_EDIT_TEXT: i32 = 0x000000a0;
    /// Text filtering a list.
    pub const TYPE_TEXT_VARIATION_FILTER: i32 = 0x000000b0;
    /// Phonetic pronunciation text.
    pub const TYPE_TEXT_VARIATION_PHONETIC: i32 = 0x000000c0;
    /// An email address inside a web form.
    pub const TYPE_TEXT_VARIATION_WEB_EMAIL_ADDRESS: i32 = 0x000000d0;
    /// A password inside a web form.
    pub const TYPE_TEXT_VARIATION_WEB_PASSWORD: i32 = 0x000000e0;

    /// Ordinary number, no specialization.
    pub const TYPE_NUMBER_VARIATION_NORMAL: i32 = 0x00000000;
    /// A numeric password such as a PIN.
    pub const TYPE_NUMBER_VARIATION_PASSWORD: i32 = 0x00000010;

    /// Ordinary phone number, no specialization.
    pub const TYPE_PHONE_VARIATION_NORMAL: i32 = 0x00000000;

    /// Combined date and time.
    pub const TYPE_DATETIME_VARIATION_NORMAL: i32 = 0x00000000;
    /// Date only.
    pub const TYPE_DATETIME_VARIATION_DATE: i32 = 0x00000010;
    /// Time only.
    pub const TYPE_DATETIME_VARIATION_TIME: i32 = 0x00000020;
}

/// Keyboard behavior flag bits, combinable with the input-type bits.
pub mod keyboard_flags {
    /// Offer completions while typing.
    pub const FLAG_AUTO_COMPLETE: i32 = 0x00000001;
    /// Correct typos automatically.
    pub const FLAG_AUTO_CORRECT: i32 = 0x00000002;
    /// Capitalize every character.
    pub const FLAG_CAP_CHARACTERS: i32 = 0x00000004;
    /// Capitalize the first character of each sentence.
    pub const FLAG_CAP_SENTENCES: i32 = 0x00000008;
    /// Capitalize the first character of each word.
    pub const FLAG_CAP_WORDS: i32 = 0x00000010;
    /// Accept line breaks.
    pub const FLAG_MULTI_LINE: i32 = 0x00000020;
    /// Suppress suggestion candidates.
    pub const FLAG_NO_SUGGESTIONS: i32 = 0x00000040;
    /// Enable predictive text.
    pub const FLAG_PREDICTIVE_TEXT: i32 = 0x00000080;
    /// Enable spell checking.
    pub const FLAG_SPELL_CHECK: i32 = 0x00000100;
}

/// Key codes the bridge recognizes in inbound key notifications.
///
/// All other codes are queued for the render loop untouched.
pub mod key_codes {
    /// Platform back key; dismisses the keyboard and drops focus.
    pub const KEYCODE_BACK: i32 = 4;
    /// Enter key; noted for the focused field, no state change.
    pub const KEYCODE_ENTER: i32 = 66;
}

/// Regex source strings for common field kinds.
///
/// Reference data for embedders that validate input themselves; the bridge
/// never compiles or applies them.
pub mod validation_patterns {
    /// Email addresses.
    pub const EMAIL_PATTERN: &str = "^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\\.[a-zA-Z]{2,}$";
    /// Phone numbers, tolerant of spacing and punctuation.
    pub const PHONE_PATTERN: &str = "^[+]?[0-9\\s\\-\\(\\)]{10,}$";
    /// Web URLs with an optional scheme.
    pub const URL_PATTERN: &str =
        "^(https?:\\/\\/)?([\\da-z\\.-]+)\\.([a-z\\.]{2,6})([\\/\\w \\.-]*)*\\/?$";
    /// Day-first calendar dates.
    pub const DATE_PATTERN: &str =
        "^(0[1-9]|[12][0-9]|3[01])[-\\/](0[1-9]|1[012])[-\\/](19|20)\\d\\d$";
    /// 24-hour clock times with optional seconds.
    pub const TIME_PATTERN: &str = "^([01]?[0-9]|2[0-3]):[0-5][0-9](:[0-5][0-9])?$";
}

/// Default field settings applied by a freshly created session.
pub mod defaults {
    use super::{input_types, keyboard_flags};

    /// Plain single-line text.
    pub const DEFAULT_INPUT_TYPE: i32 =
        input_types::TYPE_CLASS_TEXT | input_types::TYPE_TEXT_VARIATION_NORMAL;
    /// Completion and correction enabled.
    pub const DEFAULT_KEYBOARD_FLAGS: i32 =
        keyboard_flags::FLAG_AUTO_COMPLETE | keyboard_flags::FLAG_AUTO_CORRECT;
    /// Hint shown by an empty field.
    pub const DEFAULT_HINT: &str = "Enter text...";
    /// Cursor at the start of the field.
    pub const DEFAULT_CURSOR_POSITION: i32 = 0;
}

/// Localized hint texts for common field kinds.
pub mod hints {
    /// Field kinds with stock hint texts.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum HintKind {
        /// Free-form text field.
        Text,
        /// Numeric field.
        Number,
        /// Email address field.
        Email,
        /// Password field.
        Password,
        /// Phone-number field.
        Phone,
        /// URL field.
        Url,
        /// Date field.
        Date,
        /// Time field.
        Time,
    }

    /// Language used when the requested one has no translations.
    pub const DEFAULT_LANGUAGE: &str = "en";

    /// Returns the stock hint for `kind` in `language`, falling back to
    /// [`DEFAULT_LANGUAGE`] for languages without translations.
    pub fn localized_hint(language: &str, kind: HintKind) -> &'static str {
        match language {
            "id" => match kind {
                HintKind::Text => "Masukkan teks...",
                HintKind::Number => "Masukkan angka...",
                HintKind::Email => "Masukkan alamat email...",
                HintKind::Password => "Masukkan kata sandi...",
                HintKind::Phone => "Masukkan nomor telepon...",
                HintKind::Url => "Masukkan URL...",
                HintKind::Date => "Masukkan tanggal...",
                HintKind::Time => "Masukkan waktu...",
            },
            _ => match kind {
                HintKind::Text => "Enter text...",
                HintKind::Number => "Enter number...",
                HintKind::Email => "Enter email address...",
                HintKind::Password => "Enter password...",
                HintKind::Phone => "Enter phone number...",
                HintKind::Url => "Enter URL...",
                HintKind::Date => "Enter date...",
                HintKind::Time => "Enter time...",
            },
        }
    }
}
