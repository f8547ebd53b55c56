//! # Pointer 模块
//!
//! 指针平滑：每帧让跟踪点向最新的指针采样靠近固定比例。
//! 中间采样不保留，最新一次采样总是覆盖目标。

use super::geometry::Point;

/// 指针平滑器
#[derive(Debug, Clone, PartialEq)]
pub struct PointerSmoother {
    factor: f32,
    current: Option<Point>,
    target: Option<Point>,
}

impl PointerSmoother {
    /// 创建平滑器，`factor` 会被限制在 (0, 1] 内
    pub fn new(factor: f32) -> Self {
        Self {
            factor: factor.clamp(f32::EPSILON, 1.0),
            current: None,
            target: None,
        }
    }

    /// 记录新的指针采样
    ///
    /// 第一次采样直接作为跟踪点，避免从原点滑入。
    pub fn set_target(&mut self, point: Point) {
        if self.current.is_none() {
            self.current = Some(point);
        }
        self.target = Some(point);
    }

    /// 推进一帧，返回当前跟踪点
    pub fn step(&mut self) -> Option<Point> {
        let (current, target) = match (self.current, self.target) {
            (Some(current), Some(target)) => (current, target),
            _ => return self.current,
        };
        let next = Point::new(
            current.x + (target.x - current.x) * self.factor,
            current.y + (target.y - current.y) * self.factor,
        );
        self.current = Some(next);
        self.current
    }

    /// 当前跟踪点
    pub fn current(&self) -> Option<Point> {
        self.current
    }

    /// 清除所有采样
    pub fn clear(&mut self) {
        self.current = None;
        self.target = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_snaps() {
        let mut smoother = PointerSmoother::new(0.5);
        assert_eq!(smoother.step(), None);

        smoother.set_target(Point::new(10.0, 10.0));
        assert_eq!(smoother.step(), Some(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_eases_toward_latest_target() {
        let mut smoother = PointerSmoother::new(0.5);
        smoother.set_target(Point::new(0.0, 0.0));
        smoother.set_target(Point::new(100.0, 0.0));
        // 中间采样被覆盖
        smoother.set_target(Point::new(40.0, 0.0));

        assert_eq!(smoother.step(), Some(Point::new(20.0, 0.0)));
        assert_eq!(smoother.step(), Some(Point::new(30.0, 0.0)));
    }

    #[test]
    fn test_factor_one_is_direct() {
        let mut smoother = PointerSmoother::new(1.0);
        smoother.set_target(Point::new(0.0, 0.0));
        smoother.set_target(Point::new(7.0, 3.0));
        assert_eq!(smoother.step(), Some(Point::new(7.0, 3.0)));

        smoother.clear();
        assert_eq!(smoother.current(), None);
    }
}
