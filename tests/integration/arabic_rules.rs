use super::run;

#[test]
fn trailing_waw_attaches_to_the_next_word() {
    assert_eq!(
        run(
            &["fixTrailingWow"],
            "السلام عليكم و رحمة الله وبركاته الطرخون او ورق و"
        ),
        "السلام عليكم ورحمة الله وبركاته الطرخون او ورق و"
    );
    assert_eq!(
        run(
            &["fixTrailingWow"],
            "الكتاب و السنة و إنما وهموا و ظنوا"
        ),
        "الكتاب والسنة وإنما وهموا وظنوا"
    );
}

#[test]
fn numbers_are_separated_from_arabic_words() {
    let rules = ["insertSpaceBetweenArabicTextAndNumber"];
    assert_eq!(run(&rules, "الآية37"), "الآية 37");
    assert_eq!(run(&rules, "قال29 وأجاب43"), "قال 29 وأجاب 43");
}

#[test]
fn arabic_punctuation_loses_leading_space() {
    let rules = ["cleanSpacesBeforePeriod"];
    assert_eq!(run(&rules, "الإسلام أم الكفر ؟"), "الإسلام أم الكفر؟");
    assert_eq!(
        run(&rules, "ومن قال: (لا أعمل بحديث إلا إن أخذ به إمامي) ؛"),
        "ومن قال: (لا أعمل بحديث إلا إن أخذ به إمامي)؛"
    );
}

#[test]
fn arabic_colons() {
    let rules = ["addSpaceAfterColon"];
    assert_eq!(run(&rules, "قال : ومشايخنا"), "قال: ومشايخنا");
    assert_eq!(run(&rules, "قال:ومشايخنا"), "قال: ومشايخنا");
    assert_eq!(run(&rules, "[النور: 36]"), "[النور: 36]");
}

#[test]
fn tashkeel_and_tatweel_are_removed() {
    assert_eq!(run(&["removeTashkeel"], "أبـــتِـــكَةُ"), "أبتكة");
    assert_eq!(run(&["removeTashkeel"], "مُحَمَّدٌ"), "محمد");
}

#[test]
fn latin_letters_and_symbols_become_spaces() {
    assert_eq!(
        run(&["removeEnglishLettersAndSymbols"], "أحب & لنفسي"),
        "أحب   لنفسي"
    );
}

#[test]
fn digits_are_removed() {
    assert_eq!(run(&["removeAllDigits"], "abcd245"), "abcd");
    assert_eq!(run(&["removeAllDigits"], "٣٤ باب"), " باب");
}

#[test]
fn line_breaks_condense() {
    assert_eq!(
        run(&["condenseLineBreaks"], "This\n\nis\n\n\nsome\nlines"),
        "This\nis\nsome\nlines"
    );
}
