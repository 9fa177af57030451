//! Unit tests for the monitor module.
//! Player commands are scripted; output is captured in memory.

#![allow(clippy::unwrap_used)]

use std::{collections::HashSet, sync::Arc, time::Duration};

use crate::{
    config::{EmitMode, OutputFormat, PollerConfig},
    monitor::{Emitter, PollCoordinator, StateCache},
    services::{
        player::{
            FetchError, MetadataFetcher, PlaybackStatus, PlayerDiscovery, PlayerId, PlayerState,
            Playerctl, Target, icons,
        },
        process::{
            RunError,
            testing::{Reply, ScriptedRunner},
        },
    },
};

fn state(artist: &str, title: &str) -> PlayerState {
    PlayerState::new(PlaybackStatus::Playing, artist, title)
}

fn query_failed() -> FetchError {
    FetchError::QueryFailed(RunError::TimedOut {
        program: "playerctl".to_string(),
        deadline: Duration::from_millis(500),
    })
}

fn new_coordinator(
    runner: &Arc<ScriptedRunner>,
    target: Target,
    mode: EmitMode,
) -> PollCoordinator<Vec<u8>> {
    let mut config = PollerConfig::new(target);
    config.emit_mode = mode;

    let playerctl = Playerctl::new(runner.clone(), config.command_timeout);
    let emitter = Emitter::new(Vec::new(), config.format, mode, config.target.is_all());

    PollCoordinator::new(
        &config,
        PlayerDiscovery::new(playerctl.clone()),
        MetadataFetcher::new(playerctl),
        emitter,
    )
}

fn output(coordinator: &PollCoordinator<Vec<u8>>) -> Vec<String> {
    String::from_utf8(coordinator.emitter().writer().clone())
        .unwrap()
        .split_terminator('\n')
        .map(str::to_string)
        .collect()
}

mod cache {
    use super::*;

    #[tokio::test]
    async fn successful_fetch_is_stored() {
        let cache = StateCache::new();
        let player = PlayerId::from("spotify");

        assert!(cache.merge(&player, &Ok(state("Band", "Song"))).await);
        assert_eq!(cache.read(&player).await, Some(state("Band", "Song")));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn failures_never_overwrite() {
        let cache = StateCache::new();
        let player = PlayerId::from("spotify");
        cache.merge(&player, &Ok(state("Band", "Song"))).await;

        for failure in [
            FetchError::EmptyMetadata,
            query_failed(),
            FetchError::NotRunning("spotify".to_string()),
        ] {
            assert!(!cache.merge(&player, &Err(failure)).await);
            assert_eq!(cache.read(&player).await, Some(state("Band", "Song")));
        }
    }

    #[tokio::test]
    async fn fully_empty_state_is_ignored() {
        let cache = StateCache::new();
        let player = PlayerId::from("spotify");
        cache.merge(&player, &Ok(state("Band", "Song"))).await;

        assert!(!cache.merge(&player, &Ok(PlayerState::default())).await);
        assert_eq!(cache.read(&player).await, Some(state("Band", "Song")));
    }

    #[tokio::test]
    async fn status_alone_counts_as_content() {
        let cache = StateCache::new();
        let player = PlayerId::from("mpv");
        let paused = PlayerState::new(PlaybackStatus::Paused, "", "");

        assert!(cache.merge(&player, &Ok(paused.clone())).await);
        assert_eq!(cache.read(&player).await, Some(paused));
    }

    #[tokio::test]
    async fn sweep_evicts_after_consecutive_misses() {
        let cache = StateCache::new();
        let gone = PlayerId::from("vlc");
        let here = PlayerId::from("spotify");
        cache.merge(&gone, &Ok(state("A", "B"))).await;
        cache.merge(&here, &Ok(state("C", "D"))).await;

        let seen: HashSet<PlayerId> = [here.clone()].into_iter().collect();

        assert!(cache.sweep(&seen, 2).await.is_empty());
        assert_eq!(cache.sweep(&seen, 2).await, vec![gone.clone()]);
        assert_eq!(cache.read(&gone).await, None);
        assert_eq!(cache.read(&here).await, Some(state("C", "D")));
    }

    #[tokio::test]
    async fn sweep_counter_resets_on_reappearance() {
        let cache = StateCache::new();
        let player = PlayerId::from("vlc");
        cache.merge(&player, &Ok(state("A", "B"))).await;

        let none = HashSet::new();
        let present: HashSet<PlayerId> = [player.clone()].into_iter().collect();

        assert!(cache.sweep(&none, 2).await.is_empty());
        assert!(cache.sweep(&present, 2).await.is_empty());
        assert!(cache.sweep(&none, 2).await.is_empty());
        assert_eq!(cache.sweep(&none, 2).await, vec![player]);
    }

    #[tokio::test]
    async fn zero_disables_eviction() {
        let cache = StateCache::new();
        cache.merge(&PlayerId::from("vlc"), &Ok(state("A", "B"))).await;

        for _ in 0..10 {
            assert!(cache.sweep(&HashSet::new(), 0).await.is_empty());
        }
        assert!(!cache.is_empty().await);
    }

    #[tokio::test]
    async fn concurrent_merges_are_all_applied() {
        let cache = StateCache::new();

        let tasks = (0..16).map(|i| {
            let cache = cache.clone();
            tokio::spawn(async move {
                let player = PlayerId::new(format!("player{i}"));
                cache.merge(&player, &Ok(state("Artist", &i.to_string()))).await
            })
        });

        for merged in futures::future::join_all(tasks).await {
            assert!(merged.unwrap());
        }
        assert_eq!(cache.len().await, 16);
    }
}

mod emitter {
    use super::*;

    fn lines(emitter: &Emitter<Vec<u8>>) -> String {
        String::from_utf8(emitter.writer().clone()).unwrap()
    }

    #[test]
    fn plain_line_format() {
        let mut emitter = Emitter::new(Vec::new(), OutputFormat::Plain, EmitMode::EveryTick, false);
        let player = PlayerId::from("spotify");

        assert!(emitter.emit(&player, &state("Band", "Song")).unwrap());
        assert_eq!(lines(&emitter), format!("{} Band - Song\n", icons::ICON_PLAYING));
    }

    #[test]
    fn player_icon_prefix() {
        let mut emitter = Emitter::new(Vec::new(), OutputFormat::Plain, EmitMode::EveryTick, true);
        let paused = PlayerState::new(PlaybackStatus::Paused, "Band", "Song");

        emitter.emit(&PlayerId::from("spotify"), &paused).unwrap();
        assert_eq!(
            lines(&emitter),
            format!("{} {} Band - Song\n", icons::ICON_SPOTIFY, icons::ICON_PAUSED)
        );
    }

    #[test]
    fn nothing_to_show_is_not_printed() {
        let mut emitter = Emitter::new(Vec::new(), OutputFormat::Plain, EmitMode::EveryTick, false);
        let status_only = PlayerState::new(PlaybackStatus::Paused, "", "");

        assert!(!emitter.emit(&PlayerId::from("mpv"), &status_only).unwrap());
        assert!(lines(&emitter).is_empty());
    }

    #[test]
    fn every_tick_repeats_identical_state() {
        let mut emitter = Emitter::new(Vec::new(), OutputFormat::Plain, EmitMode::EveryTick, false);
        let player = PlayerId::from("spotify");

        assert!(emitter.emit(&player, &state("Band", "Song")).unwrap());
        assert!(emitter.emit(&player, &state("Band", "Song")).unwrap());
        assert_eq!(lines(&emitter).lines().count(), 2);
    }

    #[test]
    fn on_change_suppresses_identical_state() {
        let mut emitter = Emitter::new(Vec::new(), OutputFormat::Plain, EmitMode::OnChange, false);
        let player = PlayerId::from("spotify");

        assert!(emitter.emit(&player, &state("Band", "Song")).unwrap());
        assert!(!emitter.emit(&player, &state("Band", "Song")).unwrap());
        assert!(emitter.emit(&player, &state("Band", "Next Song")).unwrap());
        assert_eq!(lines(&emitter).lines().count(), 2);
    }

    #[test]
    fn on_change_tracks_players_separately() {
        let mut emitter = Emitter::new(Vec::new(), OutputFormat::Plain, EmitMode::OnChange, true);

        assert!(emitter.emit(&PlayerId::from("spotify"), &state("Band", "Song")).unwrap());
        assert!(emitter.emit(&PlayerId::from("vlc"), &state("Band", "Song")).unwrap());
    }

    #[test]
    fn repeat_ignores_on_change_suppression() {
        let mut emitter = Emitter::new(Vec::new(), OutputFormat::Plain, EmitMode::OnChange, false);
        let player = PlayerId::from("spotify");

        assert!(emitter.emit(&player, &state("Band", "Song")).unwrap());
        assert!(emitter.repeat(&player, &state("Band", "Song")).unwrap());
        assert!(!emitter.emit(&player, &state("Band", "Song")).unwrap());
        assert_eq!(lines(&emitter).lines().count(), 2);
    }

    #[test]
    fn clear_prints_blank_and_resets_tracking() {
        let mut emitter = Emitter::new(Vec::new(), OutputFormat::Plain, EmitMode::OnChange, false);
        let player = PlayerId::from("spotify");

        emitter.emit(&player, &state("Band", "Song")).unwrap();
        emitter.clear(&player).unwrap();
        assert!(emitter.emit(&player, &state("Band", "Song")).unwrap());

        let expected = format!("{0} Band - Song\n\n{0} Band - Song\n", icons::ICON_PLAYING);
        assert_eq!(lines(&emitter), expected);
    }

    #[test]
    fn forget_resets_tracking() {
        let mut emitter = Emitter::new(Vec::new(), OutputFormat::Plain, EmitMode::OnChange, false);
        let player = PlayerId::from("spotify");

        emitter.emit(&player, &state("Band", "Song")).unwrap();
        emitter.forget([&player]);
        assert!(emitter.emit(&player, &state("Band", "Song")).unwrap());
    }

    #[test]
    fn json_output() {
        let mut emitter = Emitter::new(Vec::new(), OutputFormat::Json, EmitMode::EveryTick, false);
        let player = PlayerId::from("spotify");

        emitter.emit(&player, &state("Earth &amp; Fire", "Song")).unwrap();
        emitter.clear(&player).unwrap();

        let output = lines(&emitter);
        let mut lines = output.lines();

        let first: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
        assert_eq!(
            first["text"],
            format!("{} Earth &amp; Fire - Song", icons::ICON_PLAYING)
        );
        assert_eq!(first["class"], "playing");
        assert_eq!(first["player"], "spotify");

        let second: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
        assert_eq!(second["text"], "");
        assert_eq!(second["class"], "stopped");
        assert_eq!(second["player"], "spotify");
    }
}

mod coordinator {
    use super::*;

    fn line(artist: &str, title: &str) -> String {
        format!("{} {artist} - {title}", icons::ICON_PLAYING)
    }

    #[tokio::test]
    async fn named_player_is_resolved_and_printed() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.stdout("playerctl -l", "chromium.instance_1\nspotify\n");
        runner.player("chromium.instance_1", "chrome", "Playing", "", "Channel", "Video");

        let mut coordinator = new_coordinator(
            &runner,
            Target::Named("chromium".to_string()),
            EmitMode::EveryTick,
        );
        coordinator.run_cycle().await.unwrap();

        assert_eq!(output(&coordinator), vec![line("Channel", "Video")]);
        assert_eq!(
            coordinator.cache().read(&PlayerId::from("chromium.instance_1")).await,
            Some(state("Channel", "Video"))
        );
    }

    #[tokio::test]
    async fn unresolved_name_clears_display() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.stdout("playerctl -l", "chromium.instance_1\nspotify\n");

        let mut coordinator =
            new_coordinator(&runner, Target::Named("vlc".to_string()), EmitMode::EveryTick);
        coordinator.run_cycle().await.unwrap();

        assert_eq!(output(&coordinator), vec![String::new()]);
    }

    #[tokio::test]
    async fn transient_failure_repeats_last_line() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.stdout("playerctl -l", "spotify\n");
        runner.player("spotify", "spotify", "Playing", "", "Band", "Song");

        let mut coordinator = new_coordinator(
            &runner,
            Target::Named("spotify".to_string()),
            EmitMode::EveryTick,
        );
        coordinator.run_cycle().await.unwrap();

        runner.stdout("playerctl -p spotify metadata title", "\n");
        coordinator.run_cycle().await.unwrap();

        runner.set("playerctl -p spotify metadata artist", Reply::Timeout);
        coordinator.run_cycle().await.unwrap();

        let lines = output(&coordinator);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| *l == line("Band", "Song")));
        assert_eq!(
            coordinator.cache().read(&PlayerId::from("spotify")).await,
            Some(state("Band", "Song"))
        );
    }

    #[tokio::test]
    async fn transient_failure_without_history_is_silent() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.stdout("playerctl -l", "spotify\n");
        runner.player("spotify", "spotify", "Playing", "", "", "");

        let mut coordinator = new_coordinator(&runner, Target::All, EmitMode::EveryTick);
        coordinator.run_cycle().await.unwrap();

        assert!(output(&coordinator).is_empty());
    }

    #[tokio::test]
    async fn not_running_prints_blank_but_keeps_cache() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.stdout("playerctl -l", "spotify\n");
        runner.player("spotify", "spotify", "Playing", "", "Band", "Song");

        let mut coordinator = new_coordinator(
            &runner,
            Target::Named("spotify".to_string()),
            EmitMode::EveryTick,
        );
        coordinator.run_cycle().await.unwrap();

        runner.set("pgrep spotify", Reply::Exit(1));
        coordinator.run_cycle().await.unwrap();

        assert_eq!(output(&coordinator), vec![line("Band", "Song"), String::new()]);
        assert_eq!(
            coordinator.cache().read(&PlayerId::from("spotify")).await,
            Some(state("Band", "Song"))
        );
    }

    #[tokio::test]
    async fn on_change_prints_once_until_state_changes() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.stdout("playerctl -l", "spotify\n");
        runner.player("spotify", "spotify", "Playing", "", "Band", "Song");

        let mut coordinator = new_coordinator(
            &runner,
            Target::Named("spotify".to_string()),
            EmitMode::OnChange,
        );
        coordinator.run_cycle().await.unwrap();
        coordinator.run_cycle().await.unwrap();

        runner.stdout("playerctl -p spotify metadata title", "Next Song\n");
        coordinator.run_cycle().await.unwrap();
        coordinator.run_cycle().await.unwrap();

        assert_eq!(
            output(&coordinator),
            vec![line("Band", "Song"), line("Band", "Next Song")]
        );
    }

    #[tokio::test]
    async fn on_change_repeats_last_line_on_transient_failure() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.stdout("playerctl -l", "spotify\n");
        runner.player("spotify", "spotify", "Playing", "", "Band", "Song");

        let mut coordinator = new_coordinator(
            &runner,
            Target::Named("spotify".to_string()),
            EmitMode::OnChange,
        );
        coordinator.run_cycle().await.unwrap();

        runner.set("playerctl -p spotify metadata artist", Reply::Timeout);
        coordinator.run_cycle().await.unwrap();

        runner.stdout("playerctl -p spotify metadata artist", "Band\n");
        runner.stdout("playerctl -p spotify metadata title", "\n");
        coordinator.run_cycle().await.unwrap();

        runner.stdout("playerctl -p spotify metadata title", "Song\n");
        coordinator.run_cycle().await.unwrap();

        assert_eq!(
            output(&coordinator),
            vec![
                line("Band", "Song"),
                line("Band", "Song"),
                line("Band", "Song")
            ]
        );
    }

    #[tokio::test]
    async fn player_without_album_is_printed() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.stdout("playerctl -l", "firefox.instance_1\n");
        runner.player("firefox.instance_1", "zen", "Playing", "", "Channel", "Video");
        runner.set("playerctl -p firefox.instance_1 metadata album", Reply::Exit(1));

        let mut coordinator = new_coordinator(
            &runner,
            Target::Named("firefox".to_string()),
            EmitMode::EveryTick,
        );
        for _ in 0..3 {
            coordinator.run_cycle().await.unwrap();
        }

        assert_eq!(output(&coordinator), vec![line("Channel", "Video"); 3]);
    }

    #[tokio::test]
    async fn on_change_reprints_after_player_returns() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.stdout("playerctl -l", "spotify\n");
        runner.player("spotify", "spotify", "Playing", "", "Band", "Song");

        let mut coordinator = new_coordinator(
            &runner,
            Target::Named("spotify".to_string()),
            EmitMode::OnChange,
        );
        coordinator.run_cycle().await.unwrap();

        runner.stdout("playerctl -l", "");
        coordinator.run_cycle().await.unwrap();

        runner.stdout("playerctl -l", "spotify\n");
        coordinator.run_cycle().await.unwrap();

        assert_eq!(
            output(&coordinator),
            vec![line("Band", "Song"), String::new(), line("Band", "Song")]
        );
    }

    #[tokio::test]
    async fn vanished_player_is_evicted() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.stdout("playerctl -l", "spotify\n");
        runner.player("spotify", "spotify", "Playing", "", "Band", "Song");

        let mut coordinator = new_coordinator(&runner, Target::All, EmitMode::EveryTick);
        coordinator.run_cycle().await.unwrap();
        assert_eq!(coordinator.cache().len().await, 1);

        runner.stdout("playerctl -l", "");
        for _ in 0..3 {
            coordinator.run_cycle().await.unwrap();
        }

        assert!(coordinator.cache().is_empty().await);
    }

    #[tokio::test]
    async fn mixed_outcomes_in_one_cycle() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.stdout("playerctl -l", "vlc\nspotify\nmpv\n");
        runner.player("vlc", "vlc", "Playing", "", "Old", "Tune");
        runner.player("spotify", "spotify", "Playing", "", "Band", "Song");
        runner.player("mpv", "mpv", "Paused", "", "Artist", "Clip");

        let mut coordinator = new_coordinator(&runner, Target::All, EmitMode::EveryTick);
        coordinator.run_cycle().await.unwrap();
        let first = output(&coordinator);
        assert_eq!(first.len(), 3);

        runner.set("pgrep vlc", Reply::Exit(1));
        runner.stdout("playerctl -p spotify metadata title", "New Song\n");
        runner.stdout("playerctl -p mpv metadata artist", "");
        runner.stdout("playerctl -p mpv metadata title", "");
        coordinator.run_cycle().await.unwrap();

        let lines = output(&coordinator);
        let second = &lines[3..];
        assert_eq!(
            second,
            [
                String::new(),
                format!(
                    "{} {} Band - New Song",
                    icons::ICON_SPOTIFY,
                    icons::ICON_PLAYING
                ),
                first[2].clone(),
            ]
        );
    }
}
