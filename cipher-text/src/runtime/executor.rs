//! # Executor 模块
//!
//! 根据动作把一个 tick 分派给对应的策略。
//!
//! ## 职责
//!
//! - 组装策略请求
//! - 处理 scramble/wave 的可选迭代上限
//! - 让颜色标签与文本保持对齐（wave 旋转，其余按单词重新对齐）

use crate::action::{Action, TickBudget};
use crate::alphabet::Alphabet;
use crate::color::ColorTrack;
use crate::random::RandomSource;
use crate::sizing::count_to_scramble;
use crate::strategy::{
    DecodeRequest, EncodeRequest, ScrambleRequest, Step, TransformRequest, decode, encode,
    scramble, transform, wave,
};

/// 一个 tick 的只读上下文
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    /// 动画开始时的源文本
    pub default_text: &'a str,
    /// transform 的目标文本
    pub target_text: &'a str,
    /// 替换字符集
    pub alphabet: &'a Alphabet,
    pub budget: TickBudget,
    pub preserve_spaces: bool,
}

/// 策略分派器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Executor {
    action: Action,
}

impl Executor {
    pub fn new(action: Action) -> Self {
        Self { action }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// 执行一个 tick
    ///
    /// `iteration` 为本次 tick 之前已应用的 tick 数。
    pub fn execute(
        &self,
        text: &str,
        iteration: u32,
        ctx: &TickContext<'_>,
        colors: Option<&mut ColorTrack>,
        rng: &mut dyn RandomSource,
    ) -> Step {
        let max_iterations = ctx.budget.max_iterations;

        let step = match self.action {
            Action::Decode => decode(
                &DecodeRequest {
                    text,
                    default_text: ctx.default_text,
                    current_iteration: iteration,
                    max_iterations,
                    preserve_spaces: ctx.preserve_spaces,
                },
                rng,
            ),
            Action::Encode => encode(
                &EncodeRequest {
                    text,
                    default_text: ctx.default_text,
                    alphabet: ctx.alphabet,
                    current_iteration: iteration,
                    max_iterations,
                    preserve_spaces: ctx.preserve_spaces,
                },
                rng,
            ),
            Action::Transform => transform(
                &TransformRequest {
                    text,
                    default_text: ctx.default_text,
                    target_text: ctx.target_text,
                    alphabet: ctx.alphabet,
                    current_iteration: iteration,
                    max_iterations,
                    preserve_spaces: ctx.preserve_spaces,
                },
                rng,
            ),
            Action::Scramble => {
                if ctx.budget.deadline_reached(iteration) {
                    Step::finished(text)
                } else {
                    let max_characters_to_scramble = count_to_scramble(text, rng);
                    Step::next(scramble(
                        &ScrambleRequest {
                            text,
                            alphabet: ctx.alphabet,
                            max_characters_to_scramble,
                            preserve_spaces: ctx.preserve_spaces,
                        },
                        rng,
                    ))
                }
            }
            Action::Wave => {
                if ctx.budget.deadline_reached(iteration) {
                    Step::finished(text)
                } else {
                    Step::next(wave(text))
                }
            }
        };

        if let Some(colors) = colors {
            match self.action {
                Action::Wave if !step.done => colors.rotate(),
                Action::Transform => colors.realign(&step.text),
                _ => colors.fit(&step.text),
            }
        }

        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{RngSource, SequenceSource};

    fn context<'a>(action: Action, alphabet: &'a Alphabet) -> TickContext<'a> {
        TickContext {
            default_text: "source",
            target_text: "target text",
            alphabet,
            budget: action.default_budget(),
            preserve_spaces: false,
        }
    }

    #[test]
    fn test_wave_rotates_colors() {
        let alphabet = Alphabet::base();
        let ctx = context(Action::Wave, alphabet);
        let mut rng = SequenceSource::new(vec![0.0, 0.9]);
        let mut colors = ColorTrack::assign("ab c", &["x", "y"], &mut rng);
        let executor = Executor::new(Action::Wave);

        let step = executor.execute("ab c", 0, &ctx, Some(&mut colors), &mut rng);
        assert_eq!(step, Step::next("b ca"));
        let tags: Vec<Option<&str>> = colors.tags().iter().map(|t| t.as_deref()).collect();
        assert_eq!(tags, vec![Some("x"), None, Some("y"), Some("x")]);
    }

    #[test]
    fn test_bounded_scramble_finishes() {
        let alphabet = Alphabet::base();
        let mut ctx = context(Action::Scramble, alphabet);
        ctx.budget.max_iterations = Some(3);
        let executor = Executor::new(Action::Scramble);
        let mut rng = RngSource::seeded(1);

        assert!(!executor.execute("abcdef", 2, &ctx, None, &mut rng).done);
        assert_eq!(
            executor.execute("abcdef", 3, &ctx, None, &mut rng),
            Step::finished("abcdef")
        );
    }

    #[test]
    fn test_transform_realigns_colors() {
        let alphabet = Alphabet::base();
        let ctx = context(Action::Transform, alphabet);
        let mut rng = RngSource::seeded(2);
        let mut colors = ColorTrack::assign("source", &["x"], &mut rng);
        let executor = Executor::new(Action::Transform);

        let step = executor.execute("source", 54, &ctx, Some(&mut colors), &mut rng);
        assert_eq!(step.text, "target text");
        assert_eq!(colors.len(), "target text".len());
        assert_eq!(colors.tags()[6], None);
        assert_eq!(colors.tags()[7].as_deref(), Some("x"));
    }

    #[test]
    fn test_token_decode_keeps_word_tags() {
        let alphabet = Alphabet::base();
        let mut ctx = context(Action::Decode, alphabet);
        ctx.default_text = "ab cd";
        ctx.preserve_spaces = true;
        ctx.budget.max_iterations = Some(0);
        let executor = Executor::new(Action::Decode);
        let mut rng = SequenceSource::new(vec![0.0, 0.9]);
        let mut colors = ColorTrack::assign("ab cd", &["x", "y"], &mut rng);
        colors.fit("# #");

        let step = executor.execute("# #", 0, &ctx, Some(&mut colors), &mut rng);
        assert_eq!(step.text, "ab cd");
        let tags: Vec<Option<&str>> = colors.tags().iter().map(|t| t.as_deref()).collect();
        assert_eq!(tags, vec![Some("x"), Some("x"), None, Some("y"), Some("y")]);
    }

    #[test]
    fn test_unbounded_wave_never_finishes() {
        let alphabet = Alphabet::base();
        let ctx = context(Action::Wave, alphabet);
        let executor = Executor::new(Action::Wave);
        let mut rng = SequenceSource::constant(0.0);
        let step = executor.execute("abc", u32::MAX, &ctx, None, &mut rng);
        assert_eq!(step, Step::next("bca"));
    }
}
