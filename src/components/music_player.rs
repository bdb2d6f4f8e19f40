//! Music player panel.
//!
//! No audio device is driven: playback is a clock advanced by `tick`, which
//! is enough to exercise the transport, the progress bar and the end-of-track
//! behavior.

use std::time::Duration;

use crossterm::event::{Event, KeyCode};
use ratatui::layout::Rect;
use ratatui::style::Modifier;

use super::{Component, ComponentContext, centered_x, key_press, left_click};
use crate::geometry::rect_contains;
use crate::ui::{UiFrame, truncate_to_width};
use crate::window::menu_bar::MenuCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    pub title: &'static str,
    pub artist: &'static str,
    pub duration_secs: u32,
    pub cover_url: &'static str,
    pub audio_url: &'static str,
}

pub const TRACKS: [Track; 3] = [
    Track {
        title: "Electronic Dreams",
        artist: "You",
        duration_secs: 185,
        cover_url: "https://images.unsplash.com/photo-1557682250-33bd709cbe85?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3",
        audio_url: "https://cdn.pixabay.com/download/audio/2022/05/27/audio_1808fbf07a.mp3?filename=electronic-future-beats-117997.mp3",
    },
    Track {
        title: "Ambient Flow",
        artist: "You",
        duration_secs: 240,
        cover_url: "https://images.unsplash.com/photo-1484876065684-b683cf17d276?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3",
        audio_url: "https://cdn.pixabay.com/download/audio/2022/01/18/audio_d16737dc28.mp3?filename=ambient-piano-amp-strings-10711.mp3",
    },
    Track {
        title: "Chill Sunset",
        artist: "You",
        duration_secs: 210,
        cover_url: "https://images.unsplash.com/photo-1548130858-c35fe7c92768?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3",
        audio_url: "https://cdn.pixabay.com/download/audio/2022/06/14/audio_958a24bc76.mp3?filename=chill-abstract-intention-12099.mp3",
    },
];

const DEFAULT_VOLUME: u8 = 70;
const VOLUME_STEP: u8 = 10;
const RESTART_THRESHOLD_SECS: f64 = 3.0;
const VOLUME_BAR_CELLS: u16 = 10;

/// `m:ss`, seconds truncated.
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Previous,
    PlayPause,
    Next,
    Mute,
    VolumeDown,
    VolumeUp,
}

#[derive(Debug, Default)]
struct Layout {
    title: u16,
    artist: u16,
    progress: Rect,
    times: u16,
    controls: Vec<(Control, Rect)>,
    volume_bar: Rect,
    playlist_header: u16,
    playlist: Rect,
}

impl Layout {
    fn compute(area: Rect) -> Self {
        let row = |offset: u16| area.y.saturating_add(offset);
        let inset = Rect::new(
            area.x.saturating_add(1),
            0,
            area.width.saturating_sub(2),
            1,
        );

        // "[|<]  [ > ]  [>|]"
        let transport_y = row(7);
        let transport_x = centered_x(area, "[|<]  [ > ]  [>|]");
        let volume_y = row(8);
        let mut controls = vec![
            (Control::Previous, Rect::new(transport_x, transport_y, 4, 1)),
            (
                Control::PlayPause,
                Rect::new(transport_x + 6, transport_y, 5, 1),
            ),
            (Control::Next, Rect::new(transport_x + 13, transport_y, 4, 1)),
        ];
        // "[♪] [-] ▮▮▮▮▮▮▮··· [+]"
        controls.push((Control::Mute, Rect::new(inset.x, volume_y, 3, 1)));
        controls.push((Control::VolumeDown, Rect::new(inset.x + 4, volume_y, 3, 1)));
        let volume_bar = Rect::new(inset.x + 8, volume_y, VOLUME_BAR_CELLS, 1);
        controls.push((
            Control::VolumeUp,
            Rect::new(inset.x + 9 + VOLUME_BAR_CELLS, volume_y, 3, 1),
        ));

        let playlist_top = row(11);
        Self {
            title: row(1),
            artist: row(2),
            progress: Rect::new(inset.x, row(4), inset.width, 1),
            times: row(5),
            controls,
            volume_bar,
            playlist_header: row(10),
            playlist: Rect::new(
                inset.x,
                playlist_top,
                inset.width,
                (area.y + area.height).saturating_sub(playlist_top).min(TRACKS.len() as u16),
            ),
        }
    }

    fn control_at(&self, column: u16, row: u16) -> Option<Control> {
        self.controls
            .iter()
            .find(|(_, rect)| rect_contains(*rect, column, row))
            .map(|(control, _)| *control)
    }
}

#[derive(Debug)]
pub struct MusicPlayer {
    tracks: &'static [Track],
    current: usize,
    playing: bool,
    muted: bool,
    volume: u8,
    elapsed: f64,
}

impl Default for MusicPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MusicPlayer {
    pub fn new() -> Self {
        Self {
            tracks: &TRACKS,
            current: 0,
            playing: false,
            muted: false,
            volume: DEFAULT_VOLUME,
            elapsed: 0.0,
        }
    }

    pub fn current_track(&self) -> &Track {
        &self.tracks[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Volume in percent, `0..=100`.
    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed
    }

    fn duration(&self) -> f64 {
        self.current_track().duration_secs as f64
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
        tracing::debug!(track = self.current_track().title, playing = self.playing, "toggle play");
    }

    fn select(&mut self, index: usize) {
        self.current = index % self.tracks.len();
        self.elapsed = 0.0;
    }

    pub fn next(&mut self) {
        self.select(self.current + 1);
    }

    /// Restart the track when past the first few seconds, otherwise step back
    /// one track, wrapping to the end.
    pub fn previous(&mut self) {
        if self.elapsed > RESTART_THRESHOLD_SECS {
            self.elapsed = 0.0;
        } else {
            self.select(self.current + self.tracks.len() - 1);
        }
    }

    pub fn play_track(&mut self, index: usize) {
        if index < self.tracks.len() {
            self.select(index);
            self.playing = true;
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
        if self.volume == 0 {
            self.muted = true;
        } else if self.muted {
            self.muted = false;
        }
    }

    /// Jump to `fraction` (clamped to `0..=1`) of the current track.
    pub fn seek_fraction(&mut self, fraction: f64) {
        self.elapsed = fraction.clamp(0.0, 1.0) * self.duration();
    }

    fn track_ended(&mut self) {
        if self.current + 1 < self.tracks.len() {
            self.select(self.current + 1);
        } else {
            self.select(0);
            self.playing = false;
        }
    }

    fn apply(&mut self, control: Control) {
        match control {
            Control::Previous => self.previous(),
            Control::PlayPause => self.toggle_play(),
            Control::Next => self.next(),
            Control::Mute => self.toggle_mute(),
            Control::VolumeDown => self.set_volume(self.volume.saturating_sub(VOLUME_STEP)),
            Control::VolumeUp => self.set_volume(self.volume.saturating_add(VOLUME_STEP)),
        }
    }

    fn handle_click(&mut self, area: Rect, column: u16, row: u16) -> bool {
        let layout = Layout::compute(area);
        if let Some(control) = layout.control_at(column, row) {
            self.apply(control);
            return true;
        }
        if rect_contains(layout.progress, column, row) && layout.progress.width > 0 {
            let fraction = (column - layout.progress.x) as f64 / layout.progress.width as f64;
            self.seek_fraction(fraction);
            return true;
        }
        if rect_contains(layout.volume_bar, column, row) {
            let cells = column - layout.volume_bar.x + 1;
            self.set_volume((cells * 100 / VOLUME_BAR_CELLS) as u8);
            return true;
        }
        if rect_contains(layout.playlist, column, row) {
            self.play_track((row - layout.playlist.y) as usize);
            return true;
        }
        false
    }
}

impl Component for MusicPlayer {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        let palette = ctx.palette();
        frame.fill(area, palette.window());
        if area.width < 4 || area.height < 2 {
            return;
        }
        let layout = Layout::compute(area);
        let track = *self.current_track();
        let width = area.width as usize;

        let title = truncate_to_width(&format!("♪ {}", track.title), width);
        frame.set_string(
            centered_x(area, &title),
            layout.title,
            &title,
            palette.window().add_modifier(Modifier::BOLD),
        );
        let artist = truncate_to_width(track.artist, width);
        frame.set_string(centered_x(area, &artist), layout.artist, &artist, palette.muted());

        let bar = layout.progress;
        let duration = self.duration();
        let filled = if duration > 0.0 {
            ((self.elapsed / duration).clamp(0.0, 1.0) * bar.width as f64).round() as usize
        } else {
            0
        };
        let progress = format!(
            "{}{}",
            "━".repeat(filled),
            "─".repeat((bar.width as usize).saturating_sub(filled))
        );
        frame.set_string(bar.x, bar.y, &progress, palette.accent());
        let current = format_time(self.elapsed);
        let total = format_time(duration);
        frame.set_string(bar.x, layout.times, &current, palette.muted());
        let total_x = (bar.x + bar.width).saturating_sub(total.chars().count() as u16);
        frame.set_string(total_x, layout.times, &total, palette.muted());

        for (control, rect) in &layout.controls {
            let label = match control {
                Control::Previous => "[|<]",
                Control::PlayPause if self.playing => "[ ||]",
                Control::PlayPause => "[ > ]",
                Control::Next => "[>|]",
                Control::Mute if self.muted => "[x]",
                Control::Mute => "[♪]",
                Control::VolumeDown => "[-]",
                Control::VolumeUp => "[+]",
            };
            let style = if *control == Control::PlayPause {
                palette.selected()
            } else {
                palette.window()
            };
            frame.set_string(rect.x, rect.y, label, style);
        }
        let level = (self.volume as u16 * VOLUME_BAR_CELLS / 100) as usize;
        let volume = format!(
            "{}{}",
            "▮".repeat(level),
            "·".repeat(VOLUME_BAR_CELLS as usize - level)
        );
        let volume_style = if self.muted {
            palette.muted()
        } else {
            palette.accent()
        };
        frame.set_string(layout.volume_bar.x, layout.volume_bar.y, &volume, volume_style);

        frame.set_string(
            bar.x,
            layout.playlist_header,
            "Playlist",
            palette.window().add_modifier(Modifier::BOLD),
        );
        for (idx, track) in self.tracks.iter().enumerate() {
            let y = layout.playlist.y + idx as u16;
            if idx as u16 >= layout.playlist.height {
                break;
            }
            let time = format_time(track.duration_secs as f64);
            let name = format!("{}. {} - {}", idx + 1, track.title, track.artist);
            let room = (layout.playlist.width as usize).saturating_sub(time.len() + 1);
            let line = format!(
                "{:<room$} {time}",
                truncate_to_width(&name, room),
                room = room
            );
            let style = if idx == self.current {
                palette.selected()
            } else {
                palette.window()
            };
            frame.set_string(layout.playlist.x, y, &line, style);
        }
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        if let Some(mouse) = left_click(event) {
            return self.handle_click(ctx.area(), mouse.column, mouse.row);
        }
        let Some(key) = key_press(event) else {
            return false;
        };
        match key.code {
            KeyCode::Char(' ') => self.toggle_play(),
            KeyCode::Right | KeyCode::Char('n') => self.next(),
            KeyCode::Left | KeyCode::Char('p') => self.previous(),
            KeyCode::Char('m') => self.toggle_mute(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.apply(Control::VolumeUp),
            KeyCode::Char('-') => self.apply(Control::VolumeDown),
            KeyCode::Up => self.play_track(self.current.saturating_sub(1)),
            KeyCode::Down => self.play_track((self.current + 1).min(self.tracks.len() - 1)),
            _ => return false,
        }
        true
    }

    fn tick(&mut self, elapsed: Duration) {
        if !self.playing {
            return;
        }
        self.elapsed += elapsed.as_secs_f64();
        if self.elapsed >= self.duration() {
            self.track_ended();
        }
    }

    fn menu_command(&mut self, command: MenuCommand) -> bool {
        match command {
            MenuCommand::PlayPause => self.toggle_play(),
            MenuCommand::NextTrack => self.next(),
            MenuCommand::PreviousTrack => self.previous(),
            _ => return false,
        }
        true
    }
}
