//! Integration tests for the Tactix server over real WebSockets.
//!
//! Each test starts a server on an OS-assigned port, connects
//! tokio-tungstenite clients, and drives full session flows through
//! the wire protocol.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tactix::prelude::*;
use tokio_tungstenite::tungstenite::Message;

// =========================================================================
// Helpers
// =========================================================================

type ClientWs = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// Starts a server on a random port and returns the address.
async fn start_server() -> String {
    let server = TactixServerBuilder::new()
        .bind("127.0.0.1:0")
        .build()
        .await
        .expect("server should build");

    let addr = server
        .local_addr()
        .expect("should have local addr")
        .to_string();

    tokio::spawn(async move {
        let _ = server.run().await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(10)).await;
    addr
}

async fn connect(addr: &str) -> ClientWs {
    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .expect("should connect");
    ws
}

fn encode(event: &ClientEvent) -> Message {
    let bytes = serde_json::to_vec(event).expect("encode");
    Message::Binary(bytes.into())
}

/// Receives and decodes the next server event, with a timeout so a
/// missing broadcast fails the test instead of hanging it.
async fn next_event(ws: &mut ClientWs) -> ServerEvent {
    let msg = tokio::time::timeout(Duration::from_secs(2), ws.next())
        .await
        .expect("timed out waiting for event")
        .expect("stream ended")
        .expect("recv failed");
    serde_json::from_slice(&msg.into_data()).expect("decode server event")
}

/// Creates a room as `name` on `ws`, drains the two creation events,
/// and returns the room code.
async fn create_room(ws: &mut ClientWs, name: &str) -> RoomCode {
    ws.send(encode(&ClientEvent::CreateRoom(name.into())))
        .await
        .expect("send createRoom");

    let code = match next_event(ws).await {
        ServerEvent::RoomCreated { room_code, .. } => room_code,
        other => panic!("expected roomCreated, got {other:?}"),
    };
    match next_event(ws).await {
        ServerEvent::PlayerJoined { player_count, .. } => {
            assert_eq!(player_count, 1);
        }
        other => panic!("expected playerJoined, got {other:?}"),
    }
    code
}

/// Joins `ws` into `code` as `name` and drains the joiner's two events.
async fn join_room(ws: &mut ClientWs, code: &RoomCode, name: &str) {
    ws.send(encode(&ClientEvent::JoinRoom {
        room_code: code.clone(),
        display_name: name.into(),
    }))
    .await
    .expect("send joinRoom");

    match next_event(ws).await {
        ServerEvent::RoomJoined { player_symbol, .. } => {
            assert_eq!(player_symbol, Mark::O);
        }
        other => panic!("expected roomJoined, got {other:?}"),
    }
    match next_event(ws).await {
        ServerEvent::GameState { game_active, .. } => assert!(game_active),
        other => panic!("expected gameState, got {other:?}"),
    }
}

/// Sets up a room with Alice (creator, already drained) and Bob
/// (joined, drained), draining Alice's opponentJoined + gameState too.
async fn paired_game(addr: &str) -> (ClientWs, ClientWs, RoomCode) {
    let mut alice = connect(addr).await;
    let code = create_room(&mut alice, "Alice").await;

    let mut bob = connect(addr).await;
    join_room(&mut bob, &code, "Bob").await;

    match next_event(&mut alice).await {
        ServerEvent::OpponentJoined { opponent_name } => {
            assert_eq!(opponent_name, "Bob");
        }
        other => panic!("expected opponentJoined, got {other:?}"),
    }
    match next_event(&mut alice).await {
        ServerEvent::GameState { .. } => {}
        other => panic!("expected gameState, got {other:?}"),
    }

    (alice, bob, code)
}

/// Sends a move and asserts both sides observe the same MoveMade.
async fn make_move(mover: &mut ClientWs, other: &mut ClientWs, cell: usize) {
    mover
        .send(encode(&ClientEvent::MakeMove(cell)))
        .await
        .expect("send makeMove");
    for ws in [mover, other] {
        match next_event(ws).await {
            ServerEvent::MoveMade { index, .. } => assert_eq!(index, cell),
            other => panic!("expected moveMade for cell {cell}, got {other:?}"),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_create_room_returns_code_and_symbol() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    ws.send(encode(&ClientEvent::CreateRoom("Alice".into())))
        .await
        .expect("send");

    match next_event(&mut ws).await {
        ServerEvent::RoomCreated {
            room_code,
            player_symbol,
            player_name,
        } => {
            assert_eq!(room_code.as_str().len(), 6);
            assert_eq!(player_symbol, Mark::X);
            assert_eq!(player_name, "Alice");
        }
        other => panic!("expected roomCreated, got {other:?}"),
    }
}

#[tokio::test]
async fn test_join_flow_reaches_both_players() {
    let addr = start_server().await;
    // paired_game asserts the whole choreography: roomJoined +
    // gameState to Bob, opponentJoined + gameState to Alice.
    let _ = paired_game(&addr).await;
}

#[tokio::test]
async fn test_join_unknown_room_gets_error() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    ws.send(encode(&ClientEvent::JoinRoom {
        room_code: RoomCode::new("ZZZZZZ"),
        display_name: "Bob".into(),
    }))
    .await
    .expect("send");

    match next_event(&mut ws).await {
        ServerEvent::Error(reason) => assert_eq!(reason, "room not found"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_join_full_room_gets_error() {
    let addr = start_server().await;
    let (_alice, _bob, code) = paired_game(&addr).await;

    let mut carol = connect(&addr).await;
    carol
        .send(encode(&ClientEvent::JoinRoom {
            room_code: code,
            display_name: "Carol".into(),
        }))
        .await
        .expect("send");

    match next_event(&mut carol).await {
        ServerEvent::Error(reason) => assert_eq!(reason, "room full"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_moves_broadcast_and_win_ends_game() {
    let addr = start_server().await;
    let (mut alice, mut bob, _code) = paired_game(&addr).await;

    // X takes the top row: 0, 1, 2. O answers at 3, 4.
    make_move(&mut alice, &mut bob, 0).await;
    make_move(&mut bob, &mut alice, 3).await;
    make_move(&mut alice, &mut bob, 1).await;
    make_move(&mut bob, &mut alice, 4).await;
    make_move(&mut alice, &mut bob, 2).await;

    // Both clients get the gameOver broadcast after the final move.
    for ws in [&mut alice, &mut bob] {
        match next_event(ws).await {
            ServerEvent::GameOver {
                winner,
                winner_name,
                board,
            } => {
                assert_eq!(winner, Winner::X);
                assert_eq!(winner_name.as_deref(), Some("Alice"));
                assert_eq!(board[0], Some(Mark::X));
            }
            other => panic!("expected gameOver, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_out_of_turn_move_is_silently_ignored() {
    let addr = start_server().await;
    let (mut alice, mut bob, _code) = paired_game(&addr).await;

    // O tries to move first; nothing should come back.
    bob.send(encode(&ClientEvent::MakeMove(0)))
        .await
        .expect("send");

    // A legal move afterwards is the next thing either client sees.
    make_move(&mut alice, &mut bob, 4).await;
}

#[tokio::test]
async fn test_reset_after_game_over_restarts_play() {
    let addr = start_server().await;
    let (mut alice, mut bob, _code) = paired_game(&addr).await;

    make_move(&mut alice, &mut bob, 0).await;
    make_move(&mut bob, &mut alice, 3).await;
    make_move(&mut alice, &mut bob, 1).await;
    make_move(&mut bob, &mut alice, 4).await;
    make_move(&mut alice, &mut bob, 2).await;
    for ws in [&mut alice, &mut bob] {
        match next_event(ws).await {
            ServerEvent::GameOver { .. } => {}
            other => panic!("expected gameOver, got {other:?}"),
        }
    }

    bob.send(encode(&ClientEvent::ResetGame))
        .await
        .expect("send reset");

    for ws in [&mut alice, &mut bob] {
        match next_event(ws).await {
            ServerEvent::GameReset {
                board,
                current_player,
                game_active,
            } => {
                assert!(board.iter().all(Option::is_none));
                assert_eq!(current_player, Mark::X);
                assert!(game_active);
            }
            other => panic!("expected gameReset, got {other:?}"),
        }
    }

    // X opens the rematch.
    make_move(&mut alice, &mut bob, 4).await;
}

#[tokio::test]
async fn test_disconnect_notifies_opponent() {
    let addr = start_server().await;
    let (mut alice, mut bob, _code) = paired_game(&addr).await;

    bob.close(None).await.expect("close");

    match next_event(&mut alice).await {
        ServerEvent::PlayerDisconnected { player_name } => {
            assert_eq!(player_name, "Bob");
        }
        other => panic!("expected playerDisconnected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_garbage_frame_is_skipped() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    ws.send(Message::Binary(b"not json".to_vec().into()))
        .await
        .expect("send garbage");

    // The connection survives: a valid event still works.
    ws.send(encode(&ClientEvent::CreateRoom("Alice".into())))
        .await
        .expect("send");
    match next_event(&mut ws).await {
        ServerEvent::RoomCreated { .. } => {}
        other => panic!("expected roomCreated, got {other:?}"),
    }
}

#[tokio::test]
async fn test_text_frames_are_accepted() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    // Browser clients send JSON as text frames.
    ws.send(Message::Text(
        r#"{"event":"createRoom","data":"Alice"}"#.into(),
    ))
    .await
    .expect("send text");

    match next_event(&mut ws).await {
        ServerEvent::RoomCreated { player_name, .. } => {
            assert_eq!(player_name, "Alice");
        }
        other => panic!("expected roomCreated, got {other:?}"),
    }
}

#[tokio::test]
async fn test_two_rooms_are_independent() {
    let addr = start_server().await;
    let (mut alice, mut bob, _code_1) = paired_game(&addr).await;

    let mut carol = connect(&addr).await;
    let code_2 = create_room(&mut carol, "Carol").await;
    let mut dave = connect(&addr).await;
    join_room(&mut dave, &code_2, "Dave").await;

    // A move in room 1 must not reach room 2's members.
    make_move(&mut alice, &mut bob, 0).await;

    // Carol's next events are about her own room only.
    match next_event(&mut carol).await {
        ServerEvent::OpponentJoined { opponent_name } => {
            assert_eq!(opponent_name, "Dave");
        }
        other => panic!("expected opponentJoined, got {other:?}"),
    }
}
