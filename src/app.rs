use crate::config::Config;
use crate::game::GameScreen;
use ratatui::{backend::Backend, Terminal};
use std::io;

#[derive(Clone, Debug)]
pub(crate) struct App {
    state: Screen,
}

impl App {
    pub(crate) fn new(config: &Config) -> App {
        let state = Screen::Game(GameScreen::new(config.grid, config.speed.clone()));
        App { state }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.state {
            Screen::Game(ref mut game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        match self.state {
            Screen::Game(ref mut game) => {
                if let Some(state) = game.process_input()? {
                    log::info!("Quitting");
                    self.state = state;
                }
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.state, Screen::Quit)
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Screen {
    Game(GameScreen),
    Quit,
}
