//! Command, chat, sticker and vision handlers driven with a [`MockBot`] and a [`ScriptedLlm`].

mod common;

use common::{MockBot, ScriptedLlm, Sent, CHAT_ID, USER_ID};
use llm_client::CompletionOptions;
use nancy_bot::handlers::{
    ChatHandler, CommandHandler, StickerHandler, VisionHandler, HELP_TEXT, MSG_AI_NOT_READY,
    MSG_REPLY_FAILED, MSG_VISION_FAILED,
};
use nancy_bot::{ConversationStore, ImageAnalyzer, ModelSelection, ReplyGenerator};
use prompt::MessageRole;
use std::collections::HashMap;
use std::sync::Arc;
use telegram_bot::{Handler, HandlerResponse, MediaKind};

fn generator(llm: Arc<ScriptedLlm>) -> Arc<ReplyGenerator> {
    Arc::new(ReplyGenerator::new(
        llm,
        ConversationStore::new(),
        ModelSelection::new("llama-3.1-8b-instant", vec!["gemma2-9b-it".to_string()]),
    ))
}

fn reply_text(sent: &[Sent]) -> Vec<String> {
    sent.iter()
        .filter_map(|s| match s {
            Sent::Reply { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

/// **Test: /start greets with the bold, escaped full name via HTML.**
#[tokio::test]
async fn start_greets_user() {
    let bot = MockBot::new();
    let handler = CommandHandler::new(bot.clone(), None, None);

    let response = handler.handle(&common::text("/start")).await.unwrap();

    let expected = "Hello, <b>Ada Lovelace</b>! Send media or text.";
    assert_eq!(response, HandlerResponse::Reply(expected.to_string()));
    assert_eq!(
        bot.sent(),
        vec![Sent::Html {
            chat_id: CHAT_ID,
            html: expected.to_string()
        }]
    );
}

/// **Test: /help and /log answer without an AI; /log shows the webhook host.**
#[tokio::test]
async fn help_and_log() {
    let bot = MockBot::new();
    let handler = CommandHandler::new(bot.clone(), None, Some("https://nancy.example.com".to_string()));

    handler.handle(&common::text("/help")).await.unwrap();
    handler.handle(&common::text("/log@Nancy_MetaAI_Bot")).await.unwrap();

    assert_eq!(
        reply_text(&bot.sent()),
        vec![HELP_TEXT, "Log Link: https://nancy.example.com/"]
    );
}

/// **Test: AI commands answer "AI not ready." without a generator.**
#[tokio::test]
async fn ai_commands_without_generator() {
    let bot = MockBot::new();
    let handler = CommandHandler::new(bot.clone(), None, None);

    for cmd in ["/clear", "/status", "/model"] {
        handler.handle(&common::text(cmd)).await.unwrap();
    }

    assert_eq!(reply_text(&bot.sent()), vec![MSG_AI_NOT_READY; 3]);
}

/// **Test: /status counts stored turns; /clear empties them.**
#[tokio::test]
async fn status_and_clear() {
    let bot = MockBot::new();
    let replies = generator(ScriptedLlm::replying(&["hi!", "sure"]));
    replies.generate_reply(USER_ID, CHAT_ID, "Ada", "hello").await.unwrap();
    replies.generate_reply(USER_ID, CHAT_ID, "Ada", "again").await.unwrap();
    let handler = CommandHandler::new(bot.clone(), Some(replies.clone()), None);

    handler.handle(&common::text("/status")).await.unwrap();
    handler.handle(&common::text("/clear")).await.unwrap();
    handler.handle(&common::text("/status")).await.unwrap();

    assert_eq!(
        reply_text(&bot.sent()),
        vec![
            "Messages in Memory: 2 of 15",
            "Conversation memory cleared.",
            "Messages in Memory: 0 of 15",
        ]
    );
}

/// **Test: /model lists, selects, rejects unknown and resets per chat.**
#[tokio::test]
async fn model_command() {
    let bot = MockBot::new();
    let replies = generator(ScriptedLlm::replying(&[]));
    let handler = CommandHandler::new(bot.clone(), Some(replies.clone()), None);

    handler.handle(&common::text("/model")).await.unwrap();
    handler.handle(&common::text("/model gemma2-9b-it")).await.unwrap();
    assert_eq!(replies.models().current(CHAT_ID).await, "gemma2-9b-it");
    handler.handle(&common::text("/model gpt-4o")).await.unwrap();
    assert_eq!(replies.models().current(CHAT_ID).await, "gemma2-9b-it");
    handler.handle(&common::text("/model reset")).await.unwrap();
    assert_eq!(replies.models().current(CHAT_ID).await, "llama-3.1-8b-instant");

    let texts = reply_text(&bot.sent());
    assert!(texts[0].starts_with("Current model: llama-3.1-8b-instant\nAvailable models: llama-3.1-8b-instant, gemma2-9b-it"));
    assert_eq!(texts[1], "Model set to gemma2-9b-it.");
    assert_eq!(
        texts[2],
        "Unknown model: gpt-4o. Available: llama-3.1-8b-instant, gemma2-9b-it"
    );
    assert_eq!(texts[3], "Model reset to llama-3.1-8b-instant.");
}

/// **Test: unknown commands and plain text pass through the command handler.**
#[tokio::test]
async fn command_handler_passes_other_updates() {
    let bot = MockBot::new();
    let handler = CommandHandler::new(bot.clone(), None, None);

    assert_eq!(
        handler.handle(&common::text("/unknown")).await.unwrap(),
        HandlerResponse::Continue
    );
    assert_eq!(
        handler.handle(&common::text("hello")).await.unwrap(),
        HandlerResponse::Continue
    );
    assert!(bot.sent().is_empty());
}

/// **Test: commands addressed to another bot are left alone; our own name matches any case.**
#[tokio::test]
async fn commands_for_other_bots_pass_through() {
    let bot = Arc::new(MockBot {
        username: Some("Nancy_MetaAI_Bot".to_string()),
        ..Default::default()
    });
    let handler = CommandHandler::new(bot.clone(), None, None);

    assert_eq!(
        handler.handle(&common::text("/start@SomeOtherBot")).await.unwrap(),
        HandlerResponse::Continue
    );
    assert!(bot.sent().is_empty());

    let response = handler.handle(&common::text("/help@nancy_metaai_bot")).await.unwrap();
    assert_eq!(response, HandlerResponse::Reply(HELP_TEXT.to_string()));

    let chat = ChatHandler::new(bot.clone(), None);
    assert_eq!(
        chat.handle(&common::text("/start@SomeOtherBot")).await.unwrap(),
        HandlerResponse::Stop
    );
    assert_eq!(reply_text(&bot.sent()), vec![HELP_TEXT]);
}

/// **Test: chat replies with the model output and builds persona + history + input.**
#[tokio::test]
async fn chat_replies_with_history() {
    let bot = MockBot::new();
    let llm = ScriptedLlm::replying(&["  Hi Ada!  ", "It was great."]);
    let handler = ChatHandler::new(bot.clone(), Some(generator(llm.clone())));

    handler.handle(&common::text("hello")).await.unwrap();
    let response = handler.handle(&common::text("how was the movie?")).await.unwrap();

    assert_eq!(response, HandlerResponse::Reply("It was great.".to_string()));
    assert_eq!(reply_text(&bot.sent()), vec!["Hi Ada!", "It was great."]);

    let calls = llm.calls();
    let (model, messages, options) = &calls[1];
    assert_eq!(model, "llama-3.1-8b-instant");
    assert_eq!(*options, CompletionOptions::CHAT);
    let roles: Vec<MessageRole> = messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            MessageRole::System,
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::User
        ]
    );
    assert!(messages[0].content.contains("Ada Lovelace"));
    assert_eq!(messages[1].content, "hello");
    assert_eq!(messages[2].content, "Hi Ada!");
    assert_eq!(messages[3].content, "how was the movie?");
}

/// **Test: chat uses the chat's selected model.**
#[tokio::test]
async fn chat_uses_selected_model() {
    let bot = MockBot::new();
    let llm = ScriptedLlm::replying(&["ok"]);
    let replies = generator(llm.clone());
    replies.models().select(CHAT_ID, "gemma2-9b-it").await.unwrap();
    let handler = ChatHandler::new(bot, Some(replies));

    handler.handle(&common::text("hi")).await.unwrap();

    assert_eq!(llm.calls()[0].0, "gemma2-9b-it");
}

/// **Test: a failed completion replies with the fallback and stores no turn.**
#[tokio::test]
async fn chat_failure_keeps_history_unchanged() {
    let bot = MockBot::new();
    let replies = generator(ScriptedLlm::new(vec![Err(anyhow::anyhow!("429 rate limited"))]));
    let handler = ChatHandler::new(bot.clone(), Some(replies.clone()));

    let response = handler.handle(&common::text("hello")).await.unwrap();

    assert_eq!(response, HandlerResponse::Reply(MSG_REPLY_FAILED.to_string()));
    assert_eq!(replies.history_length(USER_ID).await, 0);
}

/// **Test: a blank completion is a failure; the next prompt carries no empty turn.**
#[tokio::test]
async fn chat_blank_reply_is_not_stored() {
    let bot = MockBot::new();
    let llm = ScriptedLlm::replying(&["   ", "second"]);
    let replies = generator(llm.clone());
    let handler = ChatHandler::new(bot.clone(), Some(replies.clone()));

    let response = handler.handle(&common::text("hello")).await.unwrap();
    assert_eq!(response, HandlerResponse::Reply(MSG_REPLY_FAILED.to_string()));
    assert_eq!(replies.history_length(USER_ID).await, 0);

    handler.handle(&common::text("again")).await.unwrap();
    let calls = llm.calls();
    let (_, second_prompt, _) = &calls[1];
    assert_eq!(second_prompt.len(), 2);
    assert!(second_prompt.iter().all(|m| !m.content.is_empty()));
    assert_eq!(replies.history_length(USER_ID).await, 1);
}

/// **Test: without a generator chat answers "AI not ready."; slash text and blanks are dropped.**
#[tokio::test]
async fn chat_without_generator_and_ignored_text() {
    let bot = MockBot::new();
    let handler = ChatHandler::new(bot.clone(), None);

    assert_eq!(
        handler.handle(&common::text("/unknown")).await.unwrap(),
        HandlerResponse::Stop
    );
    assert_eq!(
        handler.handle(&common::text("   ")).await.unwrap(),
        HandlerResponse::Stop
    );
    handler.handle(&common::text("hi")).await.unwrap();

    assert_eq!(reply_text(&bot.sent()), vec![MSG_AI_NOT_READY]);
}

/// **Test: a sticker without a set is echoed back.**
#[tokio::test]
async fn sticker_without_set_is_echoed() {
    let bot = MockBot::new();
    let handler = StickerHandler::new(bot.clone());

    let response = handler.handle(&common::sticker("stk-1", None)).await.unwrap();

    assert_eq!(response, HandlerResponse::Stop);
    assert_eq!(
        bot.sent(),
        vec![Sent::Sticker {
            chat_id: CHAT_ID,
            file_id: "stk-1".to_string()
        }]
    );
}

/// **Test: a sticker from a set is answered with a different sticker of that set.**
#[tokio::test]
async fn sticker_from_set_picks_another() {
    let bot = Arc::new(MockBot {
        sticker_sets: HashMap::from([(
            "cats".to_string(),
            vec!["stk-1".to_string(), "stk-2".to_string()],
        )]),
        ..Default::default()
    });
    let handler = StickerHandler::new(bot.clone());

    handler.handle(&common::sticker("stk-1", Some("cats"))).await.unwrap();

    assert_eq!(
        bot.sent(),
        vec![Sent::Sticker {
            chat_id: CHAT_ID,
            file_id: "stk-2".to_string()
        }]
    );
}

/// **Test: sticker set lookup failures are only logged; bot senders are ignored.**
#[tokio::test]
async fn sticker_failures_are_silent() {
    let bot = MockBot::new();
    let handler = StickerHandler::new(bot.clone());

    handler.handle(&common::sticker("stk-1", Some("missing"))).await.unwrap();
    let mut from_bot = common::sticker("stk-1", None);
    from_bot.user.is_bot = true;
    handler.handle(&from_bot).await.unwrap();

    assert!(bot.sent().is_empty());
    assert_eq!(
        handler.handle(&common::text("hi")).await.unwrap(),
        HandlerResponse::Continue
    );
}

/// **Test: vision downloads the photo and replies with the analysis, caption as question.**
#[tokio::test]
async fn vision_describes_photo() {
    let bot = Arc::new(MockBot {
        files: HashMap::from([("file-1".to_string(), b"jpeg".to_vec())]),
        ..Default::default()
    });
    let llm = ScriptedLlm::replying(&["A cat on a sofa."]);
    let analyzer = Arc::new(ImageAnalyzer::new(llm.clone(), "llama-vision"));
    let handler = VisionHandler::new(bot.clone(), analyzer);

    let response = handler
        .handle(&common::media(MediaKind::Photo, None, "what animal?"))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Reply("A cat on a sofa.".to_string()));
    let calls = llm.calls();
    let (model, messages, options) = &calls[0];
    assert_eq!(model, "llama-vision");
    assert_eq!(*options, CompletionOptions::VISION);
    let user = messages.last().unwrap();
    assert_eq!(user.content, "what animal?");
    assert_eq!(user.image_url.as_deref(), Some("data:image/jpeg;base64,anBlZw=="));
}

/// **Test: vision failure replies with the fallback; non-photos pass through.**
#[tokio::test]
async fn vision_failure_and_passthrough() {
    let bot = MockBot::new();
    let analyzer = Arc::new(ImageAnalyzer::new(ScriptedLlm::replying(&[]), "v"));
    let handler = VisionHandler::new(bot.clone(), analyzer);

    let response = handler
        .handle(&common::media(MediaKind::Photo, None, ""))
        .await
        .unwrap();
    assert_eq!(response, HandlerResponse::Reply(MSG_VISION_FAILED.to_string()));

    assert_eq!(
        handler
            .handle(&common::media(MediaKind::Video, Some("a.mp4"), ""))
            .await
            .unwrap(),
        HandlerResponse::Continue
    );
}
