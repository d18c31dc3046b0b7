use crate::config::AppConfig;
use crate::deck::Deck;
use crate::input::Prompter;
use crate::log::{log_debug, log_info};
use crate::screen::Screen;
use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};

const INTRO: &str = "\tPlaying cards first entered Europe in the late 14th century, \
but the origin is unknown. The first records date to 1367 in Berne and they appear \
to have spread very rapidly across the whole of Europe, as may be seen from the \
records, mainly of card games being banned. Little is known about the appearance \
and number of these cards.\n\nOne early pattern of playing cards that evolved was \
one with the suits of Batons or Clubs, Coins, Swords, and Cups. These suits are \
still used in traditional Italian, Spanish and Portuguese playing card decks, and \
are also used in modern (occult) tarot divination cards that first appeared in the \
late 18th century.\n\n";

/// Runs the whole interactive session: intro, consent, name, card draw and
/// the topic-browsing loop. Parameterized over the prompter streams and the
/// deck source so the flow can be driven fully scripted from tests.
pub fn run<R, W, F>(
    prompter: &mut Prompter<R, W>,
    screen: &dyn Screen,
    config: &AppConfig,
    fetch: F,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnOnce() -> Result<Deck>,
{
    display_intro(prompter, config)?;

    let consent = prompter.read_text("Continue? (yes,no)", Some(&["yes", "no"]))?;
    if consent != "yes" {
        prompter.say("Exiting program... ")?;
        prompter.say("Good Bye...\n")?;
        log_info("User declined at the consent prompt");
        return Ok(());
    }

    screen.clear();
    banner(prompter, config)?;

    let name = title_case(&prompter.read_text("Enter your name", None)?);
    log_info(&format!("Session started for {}", name));

    prompter.say(&format!(
        "Hello {}, let's find out what the cards tells you about your future... \n",
        name
    ))?;

    let range_label = format!("Choose a random number between (1, {})", config.deck_size);
    let selector = prompter.read_int(&range_label, Some(1..=config.deck_size as i64))? as usize;

    let deck = fetch()?;
    let mut rng = rand::rng();
    let card = deck.draw(selector, &mut rng)?;

    screen.clear();
    banner(prompter, config)?;
    prompter.show(&format!("{} your card is {}\n", name, card.name))?;

    let details = prompter.read_text("Read, what tarot card tells about you (yes,no)", Some(&["yes", "no"]))?;
    if details != "yes" {
        prompter.say(&format!("That's a shame {}, not knowing your card!!..\n", name))?;
        prompter.say("Good Bye...\n")?;
        return Ok(());
    }

    loop {
        screen.clear();
        banner(prompter, config)?;
        prompter.say("Topics:\n")?;

        for (index, topic) in card.topics.keys().enumerate() {
            prompter.say(&format!("{}. {}\n", index + 1, title_case(topic)))?;
        }

        let choice = prompter.read_int("Your choice", Some(1..=card.topics.len() as i64))? as usize;
        let (topic, text) = card
            .topics
            .get_index(choice - 1)
            .ok_or_else(|| anyhow::anyhow!("Topic choice {} out of range", choice))?;
        log_debug(&format!("Showing topic '{}' of '{}'", topic, card.name));

        screen.clear();
        banner(prompter, config)?;
        prompter.say(&format!("{}:\n", title_case(topic)))?;
        prompter.say(text)?;

        let more = prompter.read_text("\nKnow more? (yes, no)", Some(&["yes", "no"]))?;
        if more != "yes" {
            break;
        }
    }

    prompter.say(&format!("Hope you enjoyed knowing your luck {}...\n", name))?;
    prompter.say("Good Bye...\n")?;
    Ok(())
}

fn display_intro<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    config: &AppConfig,
) -> Result<()> {
    banner(prompter, config)?;
    prompter.say("Synopsis:\n")?;
    prompter.say_from(|| INTRO.to_string())?;
    Ok(())
}

fn banner<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, config: &AppConfig) -> Result<()> {
    prompter.show(&format!("\t\t{}\n", config.title.cyan().bold()))?;
    Ok(())
}

/// Uppercases the first letter of every word, lowercasing the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
                at_word_start = false;
            } else {
                out.extend(ch.to_lowercase());
            }
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typing::Typer;
    use std::cell::Cell;
    use std::io::Cursor;

    struct NoScreen;

    impl Screen for NoScreen {
        fn clear(&self) {}
    }

    fn scripted(script: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(
            Cursor::new(script.as_bytes().to_vec()),
            Vec::new(),
            Typer::new(10.0),
            Typer::new(10.0),
        )
    }

    fn rendered(prompter: &Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(prompter.output()).into_owned()
    }

    fn sample_deck() -> Deck {
        serde_json::from_str(
            r#"{
                "cards": {
                    "the fool": {"love": "a leap of faith", "career": "a fresh start", "health": "new vigour"},
                    "the magician": {"love": "willpower", "career": "craft", "health": "balance"},
                    "the empress": {"love": "abundance", "career": "growth", "health": "comfort"}
                }
            }"#,
        )
        .unwrap()
    }

    fn sample_config() -> AppConfig {
        AppConfig {
            deck_size: 3,
            ..AppConfig::default()
        }
    }

    #[test]
    fn declining_consent_exits_before_the_name_prompt() {
        let mut prompter = scripted("no\n");
        let fetched = Cell::new(false);

        run(&mut prompter, &NoScreen, &sample_config(), || {
            fetched.set(true);
            Ok(sample_deck())
        })
        .unwrap();

        let output = rendered(&prompter);
        assert!(output.contains("Exiting program..."));
        assert!(!output.contains("Enter your name"));
        assert!(!fetched.get());
    }

    #[test]
    fn declining_details_prints_the_consolation_farewell() {
        let mut prompter = scripted("yes\nmorgan\n2\nno\n");

        run(&mut prompter, &NoScreen, &sample_config(), || Ok(sample_deck())).unwrap();

        let output = rendered(&prompter);
        assert!(output.contains("That's a shame Morgan, not knowing your card!!.."));
        assert!(!output.contains("Topics:"));
    }

    #[test]
    fn topic_menu_is_one_indexed_in_document_order() {
        let mut prompter = scripted("yes\nmorgan\n1\nyes\n1\nno\n");

        run(&mut prompter, &NoScreen, &sample_config(), || Ok(sample_deck())).unwrap();

        let output = rendered(&prompter);
        let love = output.find("1. Love").expect("first topic listed");
        let career = output.find("2. Career").expect("second topic listed");
        let health = output.find("3. Health").expect("third topic listed");
        assert!(love < career && career < health);
    }

    #[test]
    fn knowing_more_three_times_replays_the_menu_for_the_same_card() {
        let mut prompter = scripted("yes\nmorgan\n1\nyes\n1\nyes\n2\nyes\n3\nno\n");

        run(&mut prompter, &NoScreen, &sample_config(), || Ok(sample_deck())).unwrap();

        let output = rendered(&prompter);
        assert_eq!(output.matches("Topics:").count(), 3);
        assert!(output.contains("Love:"));
        assert!(output.contains("Career:"));
        assert!(output.contains("Health:"));
        assert!(output.contains("Hope you enjoyed knowing your luck Morgan..."));
    }

    #[test]
    fn rejected_consent_answers_still_get_their_hints() {
        let mut prompter = scripted("maybe\nno\n");

        run(&mut prompter, &NoScreen, &sample_config(), || Ok(sample_deck())).unwrap();

        assert_eq!(rendered(&prompter).matches("Choose (").count(), 1);
    }

    #[test]
    fn exhausted_consent_attempts_abort_the_session() {
        let mut prompter = scripted("a\nb\nc\n");

        let result = run(&mut prompter, &NoScreen, &sample_config(), || Ok(sample_deck()));

        let error = result.unwrap_err();
        assert!(matches!(
            error.downcast_ref::<crate::input::InputError>(),
            Some(crate::input::InputError::Exhausted)
        ));
    }

    #[test]
    fn title_cases_names_and_topics() {
        assert_eq!(title_case("morgan le fay"), "Morgan Le Fay");
        assert_eq!(title_case("the high priestess"), "The High Priestess");
        assert_eq!(title_case("LOVE"), "Love");
    }
}
