//! End-to-end tests: updates in, recorded sends and edits out.

mod common;

use common::{CHAT, Outbound, RecordingClient, labels, press, raw_press, text};
use gridbot::{
    AgentRoster, Dispatch, Dispatcher, EMPTY_LABEL, GameFlow, LoggingHandler, OCCUPIED_CELL,
    PLAYER_ONE_LABEL, PLAYER_TWO_LABEL, PayloadLimit, StrategyKind,
};
use std::sync::Arc;

fn bot(kinds: &[StrategyKind]) -> (Arc<RecordingClient>, Dispatcher) {
    bot_with(RecordingClient::default(), kinds)
}

fn bot_with(client: RecordingClient, kinds: &[StrategyKind]) -> (Arc<RecordingClient>, Dispatcher) {
    let client = Arc::new(client);
    let flow = Arc::new(GameFlow::new(
        AgentRoster::from_kinds(kinds),
        PayloadLimit::default(),
    ));
    let dispatcher = Dispatcher::standard(client.clone(), flow);
    (client, dispatcher)
}

/// Presses cell `index` on the most recently rendered board.
async fn play(client: &RecordingClient, dispatcher: &Dispatcher, index: usize) -> Dispatch {
    let (message_id, message_text, keyboard) = client.last_surface().expect("no board rendered");
    dispatcher
        .dispatch(&press(message_id, &message_text, &keyboard, index))
        .await
}

#[test]
fn test_chain_order() {
    let (_, dispatcher) = bot(&StrategyKind::defaults());
    assert_eq!(
        dispatcher.handler_names(),
        ["logging", "help", "new_game", "normal_move", "wrong_move"]
    );
}

#[tokio::test]
async fn test_new_game_player_one() {
    let (client, dispatcher) = bot(&StrategyKind::defaults());

    let outcome = dispatcher.dispatch(&text("/new_game_3x3_player1")).await;
    assert_eq!(outcome, Dispatch::Claimed("new_game"));

    let Some(Outbound::Sent { text, keyboard, .. }) = client.last() else {
        panic!("expected a sent board");
    };
    assert_eq!(text, "Your turn!");
    let keyboard = keyboard.expect("board keyboard");
    assert_eq!(keyboard.rows().len(), 3);
    assert!(keyboard.rows().iter().all(|row| row.len() == 3));
    assert_eq!(keyboard.actionable_count(), 9);
    assert!(labels(&keyboard).iter().all(|l| l == EMPTY_LABEL));
}

#[tokio::test]
async fn test_new_game_player_two_agent_opens() {
    let (client, dispatcher) = bot(&StrategyKind::defaults());

    dispatcher.dispatch(&text("/new_game_3x3_player2@grid_bot")).await;

    let (_, text, keyboard) = client.last_surface().unwrap();
    assert_eq!(text, "Your turn!");
    assert_eq!(labels(&keyboard)[4], PLAYER_ONE_LABEL);
    assert_eq!(keyboard.actionable_count(), 8);
}

#[tokio::test]
async fn test_unsupported_size_gets_plain_reply() {
    let (client, dispatcher) = bot(&StrategyKind::defaults());

    let outcome = dispatcher.dispatch(&text("/new_game_8x8_player1")).await;
    assert_eq!(outcome, Dispatch::Claimed("new_game"));

    let Some(Outbound::Sent { text, keyboard, .. }) = client.last() else {
        panic!("expected a reply");
    };
    assert!(text.contains("not supported"), "{text}");
    assert!(text.contains("1 to 7"), "{text}");
    assert_eq!(keyboard, None);
}

#[tokio::test]
async fn test_help() {
    let (client, dispatcher) = bot(&StrategyKind::defaults());

    assert_eq!(dispatcher.dispatch(&text("/start")).await, Dispatch::Claimed("help"));
    let Some(Outbound::Sent {
        text: usage,
        keyboard,
        ..
    }) = client.last()
    else {
        panic!("expected usage");
    };
    assert!(usage.contains("/new_game_<N>x<N>_player<1|2>"));
    assert_eq!(keyboard, None);

    // start links arrive as `/start <parameter>`
    assert_eq!(
        dispatcher.dispatch(&text("/start ref_42")).await,
        Dispatch::Claimed("help")
    );
    assert_eq!(client.log().len(), 2);
}

#[tokio::test]
async fn test_unknown_text_is_unclaimed_and_silent() {
    let (client, dispatcher) = bot(&StrategyKind::defaults());

    for message in ["hello", "/new_game", "/new_game_3x4_player1"] {
        assert_eq!(dispatcher.dispatch(&text(message)).await, Dispatch::Unclaimed);
    }
    assert!(client.log().is_empty());
}

#[tokio::test]
async fn test_logging_handler_never_claims() {
    let dispatcher = Dispatcher::new(vec![Box::new(LoggingHandler)]);
    assert_eq!(
        dispatcher.dispatch(&text("/new_game_3x3_player1")).await,
        Dispatch::Unclaimed
    );
}

#[tokio::test]
async fn test_move_edits_board_in_place() {
    let (client, dispatcher) = bot(&StrategyKind::defaults());
    dispatcher.dispatch(&text("/new_game_3x3_player1")).await;
    let (sent_id, _, _) = client.last_surface().unwrap();

    let outcome = play(&client, &dispatcher, 0).await;
    assert_eq!(outcome, Dispatch::Claimed("normal_move"));

    let log = client.log();
    let Outbound::Edited {
        message_id,
        text,
        keyboard,
    } = &log[log.len() - 2]
    else {
        panic!("expected an edit, got {log:?}");
    };
    assert_eq!(*message_id, sent_id);
    assert_eq!(text, "Your turn!");
    let marks = labels(keyboard);
    assert_eq!(marks[0], PLAYER_ONE_LABEL);
    assert_eq!(marks[4], PLAYER_TWO_LABEL);
    assert_eq!(keyboard.actionable_count(), 7);
    assert!(matches!(log.last(), Some(Outbound::Answered(_))));
}

#[tokio::test]
async fn test_agent_wins_and_board_locks() {
    let (client, dispatcher) = bot(&StrategyKind::defaults());
    dispatcher.dispatch(&text("/new_game_3x3_player1")).await;

    // X 0 / O center, X 1 / O blocks 2, X 3 / O completes 2-4-6
    for index in [0, 1, 3] {
        assert_eq!(
            play(&client, &dispatcher, index).await,
            Dispatch::Claimed("normal_move")
        );
    }

    let (_, text, keyboard) = client.last_surface().unwrap();
    assert_eq!(text, "You lose!");
    assert_eq!(keyboard.actionable_count(), 0);
    let marks = labels(&keyboard);
    for index in [2, 4, 6] {
        assert_eq!(marks[index], PLAYER_TWO_LABEL);
    }
    for index in [5, 7, 8] {
        assert_eq!(marks[index], EMPTY_LABEL);
    }
    assert!(
        keyboard
            .buttons()
            .all(|b| b.callback_data() == OCCUPIED_CELL)
    );
}

#[tokio::test]
async fn test_human_wins_and_agent_stays_quiet() {
    let (client, dispatcher) = bot(&[StrategyKind::FirstFree]);
    dispatcher.dispatch(&text("/new_game_3x3_player1")).await;

    // X 4 / O 0, X 1 / O 2, X 7 completes the middle column
    for index in [4, 1, 7] {
        play(&client, &dispatcher, index).await;
    }

    let (_, text, keyboard) = client.last_surface().unwrap();
    assert_eq!(text, "You win!");
    assert_eq!(keyboard.actionable_count(), 0);
    let marks = labels(&keyboard);
    let occupied = marks.iter().filter(|l| *l != EMPTY_LABEL).count();
    assert_eq!(occupied, 5);
    for index in [1, 4, 7] {
        assert_eq!(marks[index], PLAYER_ONE_LABEL);
    }
}

#[tokio::test]
async fn test_agent_wins_small_boards() {
    let (client, dispatcher) = bot(&[StrategyKind::FirstFree]);
    dispatcher.dispatch(&text("/new_game_2x2_player2")).await;

    // agent 0, human 3, agent 1 completes the top row
    play(&client, &dispatcher, 3).await;
    let (_, prompt, keyboard) = client.last_surface().unwrap();
    assert_eq!(prompt, "You lose!");
    assert_eq!(keyboard.actionable_count(), 0);

    let (client, dispatcher) = bot(&[StrategyKind::FirstFree]);
    dispatcher.dispatch(&text("/new_game_1x1_player2")).await;
    let (_, prompt, keyboard) = client.last_surface().unwrap();
    assert_eq!(prompt, "You lose!");
    assert_eq!(keyboard.actionable_count(), 0);
}

#[tokio::test]
async fn test_wrong_move_escalates_once() {
    let (client, dispatcher) = bot(&StrategyKind::defaults());
    dispatcher.dispatch(&text("/new_game_3x3_player2")).await;
    let (message_id, prompt, original) = client.last_surface().unwrap();
    assert_eq!(prompt, "Your turn!");

    // centre is taken by the agent
    let outcome = dispatcher
        .dispatch(&press(message_id, &prompt, &original, 4))
        .await;
    assert_eq!(outcome, Dispatch::Claimed("wrong_move"));
    let (_, first, keyboard) = client.last_surface().unwrap();
    assert_eq!(first, "Wrong move");
    assert_eq!(keyboard, original);

    dispatcher
        .dispatch(&press(message_id, &first, &keyboard, 4))
        .await;
    let (_, second, keyboard) = client.last_surface().unwrap();
    assert_eq!(second, "Wrong move!");
    assert_eq!(keyboard, original);

    // fully escalated: acknowledged, but nothing to edit
    let edits_before = client
        .log()
        .iter()
        .filter(|e| matches!(e, Outbound::Edited { .. }))
        .count();
    let outcome = dispatcher
        .dispatch(&press(message_id, &second, &keyboard, 4))
        .await;
    assert_eq!(outcome, Dispatch::Claimed("wrong_move"));
    let edits_after = client
        .log()
        .iter()
        .filter(|e| matches!(e, Outbound::Edited { .. }))
        .count();
    assert_eq!(edits_before, edits_after);
    assert!(matches!(client.last(), Some(Outbound::Answered(_))));
}

#[tokio::test]
async fn test_malformed_payloads_are_unclaimed_and_silent() {
    let (client, dispatcher) = bot(&StrategyKind::defaults());
    dispatcher.dispatch(&text("/new_game_3x3_player1")).await;
    let (message_id, prompt, keyboard) = client.last_surface().unwrap();
    let before = client.log().len();

    for data in [
        "MOVE_",
        "MOVE_4_3_3_0000",
        "MOVE_4_3_3_000020000",
        "MOVE_0_3_3_000010000",
        "MOVE_4_9_9_000010000",
        "MOVE_8_3_3_111222001",
        "UNKNOWN",
        "",
    ] {
        let outcome = dispatcher
            .dispatch(&raw_press(message_id, &prompt, &keyboard, data))
            .await;
        assert_eq!(outcome, Dispatch::Unclaimed, "{data:?}");
    }
    assert_eq!(client.log().len(), before);
}

#[tokio::test]
async fn test_failed_edit_is_reported_not_fatal() {
    let (client, dispatcher) = bot_with(RecordingClient::failing_edits(), &StrategyKind::defaults());
    dispatcher.dispatch(&text("/new_game_3x3_player1")).await;

    let outcome = play(&client, &dispatcher, 0).await;
    assert_eq!(outcome, Dispatch::Failed("normal_move"));
    assert!(
        !client
            .log()
            .iter()
            .any(|e| matches!(e, Outbound::Answered(_)))
    );

    // the bot keeps serving
    let outcome = dispatcher.dispatch(&text("/help")).await;
    assert_eq!(outcome, Dispatch::Claimed("help"));
}

#[tokio::test]
async fn test_agent_opening_without_strategy_aborts() {
    let (client, dispatcher) = bot(&[StrategyKind::Center]);

    // even width: no centre, no other strategy
    let outcome = dispatcher.dispatch(&text("/new_game_4x4_player2")).await;
    assert_eq!(outcome, Dispatch::Failed("new_game"));
    assert!(client.log().is_empty());
}

#[tokio::test]
async fn test_updates_from_other_chats_are_independent() {
    let (client, dispatcher) = bot(&StrategyKind::defaults());
    dispatcher.dispatch(&text("/new_game_3x3_player1")).await;
    let (message_id, prompt, keyboard) = client.last_surface().unwrap();

    let mut other = press(message_id, &prompt, &keyboard, 8);
    if let gridbot::Update::Callback(query) = &mut other {
        query.chat_id = CHAT + 1;
    }
    assert_eq!(
        dispatcher.dispatch(&other).await,
        Dispatch::Claimed("normal_move")
    );
}
