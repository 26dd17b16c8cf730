//! # Engine 模块
//!
//! 动画驱动器：持有状态、随机数来源与调度票据，逐 tick 推进文本。
//!
//! ## 驱动方式
//!
//! 宿主选择其一作为唯一的 tick 来源：
//!
//! ```text
//! tick()                    立即应用一个 tick
//! update(dt) -> events      累积时间，按顺序应用所有到期的 tick（不合并）
//! schedule() / fire(ticket) 定时器驱动，同一时刻只有一张有效票据
//! ```
//!
//! 重置（`reset` / `reconfigure`）会让代数加一，旧票据随之作废。

use std::time::Duration;

use tracing::{debug, info};

use crate::action::{Action, TickBudget};
use crate::alphabet::{Alphabet, randomize};
use crate::color::ColorTrack;
use crate::config::CipherConfig;
use crate::error::CipherResult;
use crate::random::{RandomSource, RngSource};
use crate::runtime::event::{CipherEvent, Frame};
use crate::runtime::executor::{Executor, TickContext};
use crate::runtime::schedule::TickTicket;
use crate::state::AnimationState;

/// 完成回调
type FinishCallback = Box<dyn FnMut()>;

/// Cipher text 动画驱动器
///
/// # 使用示例
///
/// ```ignore
/// let config = CipherConfig::new("hello").with_action(Action::Decode);
/// let mut runtime = CipherRuntime::new(config)?.with_on_finish(|| println!("done"));
///
/// while let Some(ticket) = runtime.schedule() {
///     sleep(ticket.delay());
///     if let Some(frame) = runtime.fire(ticket) {
///         println!("{}", frame.text);
///     }
/// }
/// ```
pub struct CipherRuntime {
    /// 当前配置
    config: CipherConfig,
    /// 组合后的替换字符集
    alphabet: Alphabet,
    /// 应用覆盖后的 tick 预算
    budget: TickBudget,
    /// 策略分派器
    executor: Executor,
    /// 动画状态（含颜色标签）
    state: AnimationState,
    rng: Box<dyn RandomSource>,
    on_finish: Option<FinishCallback>,
    paused: bool,
    /// 配置代数，每次重置加一
    generation: u64,
    next_sequence: u64,
    /// 未兑现的票据
    outstanding: Option<TickTicket>,
    /// `update` 累积的时间
    elapsed: Duration,
}

impl CipherRuntime {
    /// 创建 Runtime
    ///
    /// 配置不合法时立即失败，不会产生任何动画状态。
    pub fn new(config: CipherConfig) -> CipherResult<Self> {
        config.validate()?;
        let alphabet = config.character_set()?;
        let rng: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(RngSource::seeded(seed)),
            None => Box::new(RngSource::from_entropy()),
        };

        let mut runtime = Self {
            budget: config.budget(),
            executor: Executor::new(config.action),
            paused: config.paused,
            config,
            alphabet,
            state: AnimationState::default(),
            rng,
            on_finish: None,
            generation: 0,
            next_sequence: 0,
            outstanding: None,
            elapsed: Duration::ZERO,
        };
        runtime.reset();
        Ok(runtime)
    }

    /// 替换随机数来源并重新生成初始文本
    pub fn with_random_source(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self.reset();
        self
    }

    /// 注册完成回调（每次完成恰好调用一次）
    pub fn with_on_finish(mut self, on_finish: impl FnMut() + 'static) -> Self {
        self.on_finish = Some(Box::new(on_finish));
        self
    }

    /// 获取当前状态（用于快照）
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// 恢复状态
    ///
    /// 未兑现的票据作废。快照中的颜色标签原样恢复；
    /// 快照不带标签而配置要求上色时，按源文本重新分配。
    pub fn restore_state(&mut self, state: AnimationState) {
        self.state = state;
        self.invalidate_schedule();
        if !self.config.colorize_units {
            self.state.colors = None;
        } else if let Some(colors) = self.state.colors.as_mut() {
            colors.fit(&self.state.current_text);
        } else {
            self.assign_colors();
        }
        debug!(iteration = self.state.iteration, phase = ?self.state.phase, "恢复动画状态");
    }

    pub fn config(&self) -> &CipherConfig {
        &self.config
    }

    pub fn budget(&self) -> TickBudget {
        self.budget
    }

    pub fn action(&self) -> Action {
        self.executor.action()
    }

    /// 当前帧
    pub fn frame(&self) -> Frame {
        Frame {
            text: self.state.current_text.clone(),
            iteration: self.state.iteration,
            colors: self.state.colors.as_ref().map(|colors| colors.tags().to_vec()),
        }
    }

    /// 暂停或继续；暂停时作废未兑现的票据
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        if paused {
            self.invalidate_schedule();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// 未暂停且未完成
    pub fn is_active(&self) -> bool {
        !self.paused && !self.state.is_done()
    }

    /// 替换配置并重置
    ///
    /// 新配置不合法时返回错误，当前动画保持不变。
    pub fn reconfigure(&mut self, config: CipherConfig) -> CipherResult<()> {
        config.validate()?;
        self.alphabet = config.character_set()?;
        self.budget = config.budget();
        self.executor = Executor::new(config.action);
        self.paused = config.paused;
        self.config = config;
        self.reset();
        Ok(())
    }

    /// 重置到初始状态：迭代归零，作废旧票据
    pub fn reset(&mut self) {
        self.generation += 1;
        self.invalidate_schedule();
        let text = self.format_default_text();
        self.state = AnimationState::new(text);
        self.assign_colors();
        debug!(
            action = %self.executor.action(),
            generation = self.generation,
            length = self.config.source_text.chars().count(),
            "重置动画"
        );
    }

    /// 立即应用一个 tick
    ///
    /// 暂停或已完成时返回 `None`。
    pub fn tick(&mut self) -> Option<Frame> {
        self.apply_tick()
    }

    /// 获取下一张 tick 票据
    ///
    /// 已有未兑现票据时返回同一张；暂停、已完成或间隔为 0 时返回 `None`。
    pub fn schedule(&mut self) -> Option<TickTicket> {
        if !self.is_active() || !self.budget.is_schedulable() {
            return None;
        }
        if let Some(ticket) = self.outstanding {
            return Some(ticket);
        }

        let ticket = TickTicket::new(
            self.generation,
            self.next_sequence,
            self.budget.iteration_speed,
        );
        self.next_sequence += 1;
        self.outstanding = Some(ticket);
        Some(ticket)
    }

    /// 兑现票据
    ///
    /// 过期票据（重置前签发、已取消或已兑现）被忽略。
    pub fn fire(&mut self, ticket: TickTicket) -> Option<Frame> {
        if self.outstanding != Some(ticket) {
            debug!(
                generation = ticket.generation(),
                sequence = ticket.sequence(),
                current_generation = self.generation,
                "忽略过期的 tick 票据"
            );
            return None;
        }
        self.outstanding = None;
        self.apply_tick()
    }

    /// 取消调度（宿主销毁时调用）
    pub fn cancel(&mut self) {
        self.invalidate_schedule();
    }

    /// 推进时间
    ///
    /// 按顺序应用所有到期的 tick，每个 tick 产生一帧；完成时额外产生 `Finished`。
    pub fn update(&mut self, dt: Duration) -> Vec<CipherEvent> {
        let mut events = Vec::new();
        if !self.is_active() || !self.budget.is_schedulable() {
            return events;
        }

        let speed = self.budget.iteration_speed;
        self.elapsed += dt;
        while self.elapsed >= speed && self.is_active() {
            self.elapsed -= speed;
            let Some(frame) = self.apply_tick() else {
                break;
            };
            events.push(CipherEvent::Frame(frame));
            if self.state.is_done() {
                events.push(CipherEvent::Finished {
                    iterations: self.state.iteration,
                });
            }
        }
        events
    }

    /// 应用一个 tick 并处理完成边沿
    fn apply_tick(&mut self) -> Option<Frame> {
        if !self.is_active() {
            return None;
        }
        self.state.begin();

        let ctx = TickContext {
            default_text: &self.config.source_text,
            target_text: self.config.target(),
            alphabet: &self.alphabet,
            budget: self.budget,
            preserve_spaces: self.config.preserve_spaces,
        };
        let step = self.executor.execute(
            &self.state.current_text,
            self.state.iteration,
            &ctx,
            self.state.colors.as_mut(),
            self.rng.as_mut(),
        );

        self.state.current_text = step.text;
        self.state.iteration = self.state.iteration.saturating_add(1);

        if step.done && self.state.finish() {
            self.invalidate_schedule();
            info!(
                action = %self.executor.action(),
                iterations = self.state.iteration,
                "动画完成"
            );
            if let Some(on_finish) = self.on_finish.as_mut() {
                on_finish();
            }
        }

        Some(self.frame())
    }

    fn invalidate_schedule(&mut self) {
        self.outstanding = None;
        self.elapsed = Duration::ZERO;
    }

    /// 初始文本：decode 从随机字符开始，其余动作从源文本开始
    fn format_default_text(&mut self) -> String {
        if self.executor.action() == Action::Decode {
            randomize(
                &self.config.source_text,
                &self.alphabet,
                self.config.preserve_spaces,
                self.rng.as_mut(),
            )
        } else {
            self.config.source_text.clone()
        }
    }

    /// 按源文本的单词分配颜色，再对齐到当前文本
    fn assign_colors(&mut self) {
        self.state.colors = self.config.colorize_units.then(|| {
            let mut track = ColorTrack::assign(
                &self.config.source_text,
                &self.config.palette,
                self.rng.as_mut(),
            );
            track.fit(&self.state.current_text);
            track
        });
    }
}
