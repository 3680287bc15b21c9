use super::run;

#[test]
fn smart_quotes_pair_up() {
    assert_eq!(
        run(
            &["applySmartQuotes"],
            r#"The "quick brown" fox jumped "right" over the lazy dog."#
        ),
        "The “quick brown” fox jumped “right” over the lazy dog."
    );
}

#[test]
fn smart_quotes_open_an_unpaired_quote() {
    assert_eq!(
        run(&["applySmartQuotes"], r#"He said "hello"#),
        "He said “hello"
    );
}

#[test]
fn salutations_become_the_ligature() {
    assert_eq!(
        run(
            &["fixSalutations"],
            "The Prophet (sallAllahu alayhi wa sallam) said"
        ),
        "The Prophet ﷺ said"
    );
    assert_eq!(
        run(
            &["fixSalutations"],
            "Then (peace and blessings be upon him) said"
        ),
        "Then ﷺ said"
    );
    assert_eq!(
        run(
            &["fixSalutations"],
            "Muhammad (May Allah's peace and blessings be upon him)"
        ),
        "Muhammad ﷺ"
    );
}

#[test]
fn death_years_are_removed() {
    assert_eq!(
        run(&["removeDeathYear"], "Sufyān ibn ‘Uyaynah (d. 198h) said:"),
        "Sufyān ibn ‘Uyaynah said:"
    );
    assert_eq!(
        run(&["removeDeathYear"], "al-Zuhri [d. 124H] narrated"),
        "al-Zuhri narrated"
    );
}

#[test]
fn assimilated_prefixes_become_al() {
    assert_eq!(
        run(
            &["al-prefix"],
            "Al-Rahman bar-Rahman becomes al-Rahman, and ar-Rahman becomes al-Rahman, \
             and As-Sukkari and as-Sukkari both become al-Sukkari, and adh-Dhahabi and \
             Adh-Dhahabi both turn to Al Dhahabi with Sufyan Ath Thawri"
        ),
        "al-Rahman bar-Rahman becomes al-Rahman, and al-Rahman becomes al-Rahman, \
         and al-Sukkari and al-Sukkari both become al-Sukkari, and al-Dhahabi and \
         al-Dhahabi both turn to al-Dhahabi with Sufyan al-Thawri"
    );
}

#[test]
fn space_separated_prefixes_become_al() {
    assert_eq!(
        run(
            &["al-prefix"],
            "Az-Zuhri and Az Zuhri should both get formatted baz Baz B-Az"
        ),
        "al-Zuhri and al-Zuhri should both get formatted baz Baz B-Az"
    );
}

#[test]
fn prefixes_before_accented_capitals() {
    assert_eq!(
        run(&["al-prefix"], "Ad-Ḏuhlī and Sufyān Ats-Thawrī"),
        "al-Ḏuhlī and Sufyān al-Thawrī"
    );
}

#[test]
fn prefixes_after_non_ascii_letters() {
    assert_eq!(
        run(&["al-prefix"], "ʿAl Rahman and ʿAd-Dhahabi"),
        "ʿal-Rahman and ʿal-Dhahabi"
    );
}

#[test]
fn prefixes_before_lowercase_words_are_kept() {
    assert_eq!(
        run(
            &["al-prefix"],
            "Ash-hadu an la ilaha should be intact but ash-Shafiee or Ash-Shafiee and \
             Ash-Shaykh should be changed"
        ),
        "Ash-hadu an la ilaha should be intact but al-Shafiee or al-Shafiee and \
         al-Shaykh should be changed"
    );
}

#[test]
fn spaces_before_punctuation_are_removed() {
    assert_eq!(
        run(
            &["cleanSpacesBeforePeriod"],
            "This sentence has some space , before period  . Hello"
        ),
        "This sentence has some space, before period. Hello"
    );
    assert_eq!(
        run(&["cleanSpacesBeforePeriod"], "Hello , world !"),
        "Hello, world!"
    );
}

#[test]
fn colons_get_a_space_except_in_references() {
    let rules = ["addSpaceAfterColon"];
    assert_eq!(run(&rules, "(al-Nūr:27)"), "(al-Nūr: 27)");
    assert_eq!(run(&rules, "a:2 of them"), "a: 2 of them");
    assert_eq!(run(&rules, "2:asdf"), "2: asdf");
    assert_eq!(run(&rules, "a:ksjdf"), "a: ksjdf");
    assert_eq!(run(&rules, "a : b"), "a: b");
    assert_eq!(run(&rules, "61:23"), "61:23");
    assert_eq!(run(&rules, "https://example.com"), "https://example.com");
}

#[test]
fn references_lose_inner_spaces() {
    assert_eq!(
        run(&["reduceSpaceBetweenReference"], "al-Siyar 127 / 11"),
        "al-Siyar 127/11"
    );
}

#[test]
fn double_brackets_become_single() {
    assert_eq!(
        run(&["doubleToSingleBrackets"], "He said ((This is)) and [[that]]"),
        "He said (This is) and [that]"
    );
}

#[test]
fn asterisk_separators_collapse() {
    assert_eq!(run(&["condenseAsterisks"], "Hello * * * World"), "Hello * World");
    assert_eq!(run(&["condenseAsterisks"], "a * b"), "a * b");
}

#[test]
fn whitespace_cleanup() {
    assert_eq!(
        run(&["cleanMultilines", "condenseMultilines"], "a  \nb\n\n\n\nc"),
        "a\nb\n\nc"
    );
    assert_eq!(run(&["reduceSpaces"], "a    b\t\tc"), "a b c");
    assert_eq!(run(&["trimEdges"], " \n padded \t"), "padded");
}
