//! services/api/src/adapters/catalog.rs
//!
//! This module contains the content feed adapter, the concrete implementation of
//! the `ContentFeedService` port. It serves fixed in-memory collections.

use async_trait::async_trait;
use baeumteo_core::domain::{
    Cohort, CohortSet, ContentDetails, ContentItem, ContentKind, Difficulty, FraudRisk,
    SubscriptionTier,
};
use baeumteo_core::finance::{ExpenseCategory, FinanceMonth};
use baeumteo_core::ports::{ContentFeedService, PortResult};
use std::collections::HashMap;
use std::sync::Arc;

use Cohort::{Fifties, Forties, Seventies, Sixties};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A feed adapter over the built-in mock collections.
#[derive(Clone)]
pub struct StaticCatalogAdapter {
    collections: Arc<HashMap<ContentKind, Vec<ContentItem>>>,
    finance: FinanceMonth,
}

impl StaticCatalogAdapter {
    /// Creates a catalog preloaded with the built-in collections.
    pub fn new() -> Self {
        Self::from_collections(vec![
            (ContentKind::Insight, insights()),
            (ContentKind::LearningCard, learning_cards()),
            (ContentKind::Job, jobs()),
            (ContentKind::Course, courses()),
            (ContentKind::Post, posts()),
            (ContentKind::Event, events()),
            (ContentKind::ScamTip, scam_tips()),
            (ContentKind::Faq, faqs()),
        ])
    }

    pub fn from_collections(collections: Vec<(ContentKind, Vec<ContentItem>)>) -> Self {
        Self {
            collections: Arc::new(collections.into_iter().collect()),
            finance: finance_month(),
        }
    }

    /// Replaces the ledger month served by `fetch_finance_month`.
    pub fn with_finance_month(mut self, month: FinanceMonth) -> Self {
        self.finance = month;
        self
    }
}

impl Default for StaticCatalogAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentFeedService for StaticCatalogAdapter {
    async fn fetch(&self, kind: ContentKind) -> PortResult<Vec<ContentItem>> {
        Ok(self.collections.get(&kind).cloned().unwrap_or_default())
    }

    async fn fetch_finance_month(&self) -> PortResult<FinanceMonth> {
        Ok(self.finance.clone())
    }
}

//=========================================================================================
// Builders
//=========================================================================================

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn insight(
    id: &str,
    title: &str,
    summary: &str,
    category: &str,
    topic: &str,
    read_time: &str,
    published: &str,
    source: &str,
    tags: &[&str],
) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        kind: ContentKind::Insight,
        title: title.to_string(),
        summary: summary.to_string(),
        category: category.to_string(),
        tags: strings(tags),
        cohorts: CohortSet::ALL,
        details: ContentDetails::Insight {
            topic: topic.to_string(),
            read_time: read_time.to_string(),
            published: published.to_string(),
            source: source.to_string(),
            url: "https://perplexity.ai".to_string(),
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn job(
    id: &str,
    title: &str,
    company: &str,
    location: &str,
    distance: &str,
    pay: &str,
    schedule: &str,
    tags: &[&str],
    description: &str,
) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        kind: ContentKind::Job,
        title: title.to_string(),
        summary: description.to_string(),
        category: "시니어 일자리".to_string(),
        tags: strings(tags),
        cohorts: CohortSet::ALL,
        details: ContentDetails::Job {
            company: company.to_string(),
            location: location.to_string(),
            distance: distance.to_string(),
            pay: pay.to_string(),
            schedule: schedule.to_string(),
            senior_friendly: true,
        },
    }
}

const POST_TITLE_CHARS: usize = 20;

/// The first `max` characters of `text`, with an ellipsis when cut.
fn excerpt(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{}…", head.trim_end())
    } else {
        head
    }
}

fn scam_tip(
    id: &str,
    kind: &str,
    risk: FraudRisk,
    description: &str,
    examples: &[&str],
    prevention: &[&str],
) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        kind: ContentKind::ScamTip,
        title: kind.to_string(),
        summary: description.to_string(),
        category: "사기 유형".to_string(),
        tags: Vec::new(),
        cohorts: CohortSet::ALL,
        details: ContentDetails::ScamTip {
            risk,
            examples: strings(examples),
            prevention: strings(prevention),
        },
    }
}

fn faq(id: &str, question: &str, answer: &str) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        kind: ContentKind::Faq,
        title: question.to_string(),
        summary: answer.to_string(),
        category: "자주 묻는 질문".to_string(),
        tags: Vec::new(),
        cohorts: CohortSet::ALL,
        details: ContentDetails::Faq,
    }
}

#[allow(clippy::too_many_arguments)]
fn post(
    id: &str,
    author: &str,
    cohort: Cohort,
    posted: &str,
    content: &str,
    likes: u32,
    comments: u32,
    category: &str,
    verified: bool,
) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        kind: ContentKind::Post,
        title: excerpt(content, POST_TITLE_CHARS),
        summary: content.to_string(),
        category: category.to_string(),
        tags: Vec::new(),
        cohorts: CohortSet::of(&[cohort]),
        details: ContentDetails::Post {
            author: author.to_string(),
            posted: posted.to_string(),
            likes,
            comments,
            verified,
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn event(
    id: &str,
    title: &str,
    date: &str,
    time: &str,
    location: &str,
    participants: u32,
    max_participants: u32,
    category: &str,
    description: &str,
    cohort: Option<Cohort>,
) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        kind: ContentKind::Event,
        title: title.to_string(),
        summary: description.to_string(),
        category: category.to_string(),
        tags: Vec::new(),
        // An event without an age band is open to everyone.
        cohorts: cohort.map_or(CohortSet::ALL, |c| CohortSet::of(&[c])),
        details: ContentDetails::Event {
            date: date.to_string(),
            time: time.to_string(),
            location: location.to_string(),
            participants,
            max_participants,
        },
    }
}

//=========================================================================================
// Collections
//=========================================================================================

fn insights() -> Vec<ContentItem> {
    vec![
        insight(
            "1",
            "ChatGPT-4의 새로운 음성 대화 기능",
            "OpenAI가 발표한 GPT-4의 음성 인터페이스는 자연스러운 대화가 가능합니다. 실시간 음성 인식과 감정 인식 기능이 추가되어 더욱 인간적인 상호작용이 가능해졌습니다.",
            "AI 기술",
            "ChatGPT",
            "3분",
            "2시간 전",
            "OpenAI Blog",
            &["AI", "음성인식", "대화형AI"],
        ),
        insight(
            "2",
            "중장년층을 위한 AI 활용 가이드",
            "50대 이상을 위한 실용적인 AI 도구 활용법. 일상생활에서 바로 쓸 수 있는 이메일 작성, 사진 편집, 문서 정리 등의 기능을 소개합니다.",
            "실용 가이드",
            "시니어 AI",
            "5분",
            "5시간 전",
            "TechCrunch",
            &["시니어", "활용법", "실생활"],
        ),
        insight(
            "3",
            "최신 AI 사기 수법과 예방법",
            "AI 기술을 악용한 딥페이크 보이스피싱이 증가하고 있습니다. 가족의 목소리를 모방하는 사기 수법과 이를 구별하는 방법을 알아봅니다.",
            "보안",
            "사기예방",
            "4분",
            "1일 전",
            "경찰청 사이버안전국",
            &["보안", "딥페이크", "사기예방"],
        ),
        insight(
            "4",
            "Google의 Gemini AI 완전 분석",
            "구글의 최신 AI 모델 Gemini의 기능과 활용 방법. 멀티모달 처리로 텍스트, 이미지, 음성을 동시에 이해하고 생성할 수 있습니다.",
            "AI 기술",
            "Google AI",
            "6분",
            "1일 전",
            "Google AI Blog",
            &["Google", "Gemini", "멀티모달"],
        ),
        insight(
            "5",
            "AI로 재무 계획 세우기",
            "개인 재무 관리에 AI를 활용하는 방법. 지출 패턴 분석, 저축 목표 설정, 투자 포트폴리오 제안까지 AI가 도와줍니다.",
            "재무",
            "AI 재무관리",
            "5분",
            "2일 전",
            "한국경제",
            &["재무", "투자", "AI활용"],
        ),
        insight(
            "6",
            "노션 AI로 업무 효율 3배 높이기",
            "노션의 AI 기능을 활용한 문서 자동화, 회의록 요약, 할 일 관리. 실제 직장인들의 생산성 향상 사례를 소개합니다.",
            "생산성",
            "업무 도구",
            "4분",
            "2일 전",
            "Notion Blog",
            &["노션", "생산성", "업무자동화"],
        ),
        insight(
            "7",
            "AI 이미지 생성 도구 비교",
            "Midjourney, DALL-E 3, Stable Diffusion의 장단점 비교. 각 도구의 특징과 어떤 상황에 어떤 도구를 사용하면 좋을지 안내합니다.",
            "AI 기술",
            "이미지 생성",
            "7분",
            "3일 전",
            "The Verge",
            &["이미지생성", "Midjourney", "DALL-E"],
        ),
        insight(
            "8",
            "AI와 함께하는 건강 관리",
            "건강 데이터 분석 AI 앱들이 개인 맞춤 건강 조언을 제공합니다. 운동, 식단, 수면 패턴을 분석하여 건강 목표 달성을 도와줍니다.",
            "건강",
            "헬스케어 AI",
            "5분",
            "3일 전",
            "Healthcare IT News",
            &["건강", "헬스케어", "AI분석"],
        ),
    ]
}

fn learning_cards() -> Vec<ContentItem> {
    let card = |id: &str,
                title: &str,
                category: &str,
                difficulty: Difficulty,
                duration: &str,
                key_points: &[&str],
                steps: &[&str],
                source: &str,
                warning: Option<&str>,
                fraud_risk: FraudRisk,
                has_video: bool,
                cohorts: &[Cohort]| ContentItem {
        id: id.to_string(),
        kind: ContentKind::LearningCard,
        title: title.to_string(),
        summary: key_points.first().copied().unwrap_or_default().to_string(),
        category: category.to_string(),
        tags: Vec::new(),
        cohorts: CohortSet::of(cohorts),
        details: ContentDetails::LearningCard {
            difficulty,
            duration: duration.to_string(),
            key_points: strings(key_points),
            steps: strings(steps),
            source: source.to_string(),
            warning: warning.map(str::to_string),
            fraud_risk: Some(fraud_risk),
            has_voice: true,
            has_video,
        },
    };

    vec![
        card(
            "1",
            "챗GPT로 이메일 자동 작성하기",
            "AI 실무",
            Difficulty::Easy,
            "3분",
            &[
                "챗GPT를 이용해 업무 이메일을 빠르게 작성할 수 있습니다",
                "시간을 절약하고 더 전문적인 문장을 만들 수 있습니다",
                "주의: 민감한 정보는 입력하지 마세요",
            ],
            &[
                "챗GPT 웹사이트에 접속하기",
                "이메일 내용을 요청하는 메시지 입력하기",
                "결과를 복사해서 이메일에 붙여넣기",
            ],
            "OpenAI 공식 가이드",
            Some("회사 기밀이나 개인정보는 절대 입력하지 마세요"),
            FraudRisk::Low,
            true,
            &[Forties, Fifties],
        ),
        card(
            "2",
            "스미싱 문자 구별하는 방법",
            "보안",
            Difficulty::Easy,
            "2분",
            &[
                "가짜 문자를 구별하는 3가지 방법을 알려드립니다",
                "클릭하기 전에 반드시 확인하세요",
                "의심스러우면 112나 가족에게 먼저 물어보세요",
            ],
            &[
                "발신번호가 정상인지 확인하기",
                "링크 주소가 공식 사이트인지 보기",
                "급하게 돈을 요구하면 100% 사기",
            ],
            "경찰청 사이버안전국",
            Some("의심스러운 링크는 절대 클릭하지 마세요"),
            FraudRisk::High,
            false,
            &[Fifties, Sixties, Seventies],
        ),
        card(
            "3",
            "카카오톡으로 사진 예쁘게 보내기",
            "생활 팁",
            Difficulty::Easy,
            "2분",
            &[
                "사진을 원본 그대로 보내는 방법",
                "여러 장을 한 번에 보내는 방법",
                "앨범으로 정리해서 보내는 방법",
            ],
            &[
                "채팅방에서 + 버튼 누르기",
                "앨범에서 사진 선택하기",
                "원본 전송 체크하고 보내기",
            ],
            "카카오 공식 도움말",
            None,
            FraudRisk::Low,
            true,
            &[Sixties, Seventies],
        ),
        card(
            "4",
            "AI로 재무 계획 세우기",
            "AI 실무",
            Difficulty::Medium,
            "5분",
            &[
                "AI를 활용해 가계부와 재무 목표를 관리할 수 있습니다",
                "대출 상환 계획과 저축 목표를 자동으로 계산합니다",
                "개인정보 보호를 위해 구체적인 금액보다는 비율로 입력하세요",
            ],
            &[
                "ChatGPT에 재무 상황 설명하기 (금액 대신 비율 사용)",
                "목표와 기간 알려주기",
                "제안받은 계획을 엑셀로 정리하기",
            ],
            "금융감독원 승인",
            Some("구체적인 계좌번호나 자산 금액은 입력하지 마세요"),
            FraudRisk::Medium,
            true,
            &[Forties, Fifties],
        ),
    ]
}

fn jobs() -> Vec<ContentItem> {
    vec![
        job(
            "1",
            "카페 바리스타 (교육 제공)",
            "따뜻한 카페",
            "강남구 역삼동",
            "1.2km",
            "시급 12,000원",
            "주 3일 · 오전 9시-2시",
            &["시니어환영", "유연근무", "교육지원"],
            "경력 무관, 친절한 교육 제공",
        ),
        job(
            "2",
            "아파트 경비 (주간)",
            "○○아파트",
            "서초구 서초동",
            "2.5km",
            "월급 220만원",
            "주 5일 · 오전 9시-6시",
            &["시니어우대", "정규직", "4대보험"],
            "50-65세 우대, 복지 우수",
        ),
        job(
            "3",
            "택배 상·하차 보조",
            "○○물류",
            "송파구 문정동",
            "3.8km",
            "시급 15,000원",
            "주 5일 · 오전 6시-10시",
            &["시니어환영", "단시간", "일당지급"],
            "체력 필요, 즉시 근무 가능",
        ),
        job(
            "4",
            "학교 급식 보조",
            "○○초등학교",
            "강남구 대치동",
            "1.8km",
            "시급 11,000원",
            "주 5일 · 오전 9시-2시",
            &["시니어환영", "방학있음", "4대보험"],
            "조리 경력 우대, 방학 휴무",
        ),
    ]
}

fn courses() -> Vec<ContentItem> {
    let course = |id: &str,
                  title: &str,
                  description: &str,
                  lessons: u32,
                  duration: &str,
                  difficulty: Difficulty,
                  category: &str,
                  progress: u8,
                  downloaded: bool,
                  locked: bool,
                  cohorts: &[Cohort]| ContentItem {
        id: id.to_string(),
        kind: ContentKind::Course,
        title: title.to_string(),
        summary: description.to_string(),
        category: category.to_string(),
        tags: Vec::new(),
        cohorts: CohortSet::of(cohorts),
        details: ContentDetails::Course {
            lessons,
            duration: duration.to_string(),
            difficulty,
            progress,
            downloaded,
            required_tier: if locked {
                SubscriptionTier::Premium
            } else {
                SubscriptionTier::Free
            },
        },
    };

    vec![
        course(
            "1",
            "AI 기초부터 활용까지",
            "챗GPT, 이미지 생성 AI 등 실생활에 바로 쓸 수 있는 AI 도구 10가지",
            10,
            "2시간",
            Difficulty::Easy,
            "AI 실무",
            70,
            true,
            false,
            &[Forties, Fifties, Sixties, Seventies],
        ),
        course(
            "2",
            "보이스피싱·스미싱 완벽 대응",
            "최신 사기 수법과 예방법, 피해 발생 시 대처 방법까지",
            8,
            "1시간 30분",
            Difficulty::Easy,
            "보안",
            100,
            true,
            false,
            &[Fifties, Sixties, Seventies],
        ),
        course(
            "3",
            "스마트폰 200% 활용하기",
            "카카오톡, 사진, 앱 설치부터 유용한 기능까지",
            12,
            "2시간 30분",
            Difficulty::Easy,
            "생활 팁",
            30,
            false,
            false,
            &[Sixties, Seventies],
        ),
        course(
            "4",
            "재무 관리 AI 도구",
            "가계부, 재무 계획, 투자 분석에 AI 활용하기",
            15,
            "3시간",
            Difficulty::Medium,
            "AI 실무",
            0,
            false,
            false,
            &[Forties, Fifties],
        ),
        course(
            "5",
            "시니어 창업 가이드",
            "온라인 판매부터 SNS 마케팅까지 단계별 안내",
            20,
            "4시간",
            Difficulty::Medium,
            "창업",
            0,
            false,
            true,
            &[Fifties, Sixties],
        ),
        course(
            "6",
            "건강 관리 스마트 도구",
            "복약 알림, 건강 기록, 병원 예약 앱 사용법",
            10,
            "2시간",
            Difficulty::Easy,
            "건강",
            50,
            true,
            false,
            &[Sixties, Seventies],
        ),
    ]
}

fn posts() -> Vec<ContentItem> {
    vec![
        post(
            "1",
            "김영희",
            Sixties,
            "2시간 전",
            "오늘 챗GPT로 손주 생일 카드 만들어봤어요! 정말 신기하네요. 손주가 너무 좋아했습니다 😊",
            24,
            8,
            "AI 활용 후기",
            true,
        ),
        post(
            "2",
            "이철수",
            Fifties,
            "5시간 전",
            "엑셀 자동화 강좌 듣고 회사에서 바로 써먹었습니다. 업무 시간이 절반으로 줄었어요!",
            45,
            12,
            "실무 활용",
            true,
        ),
        post(
            "3",
            "박순자",
            Seventies,
            "1일 전",
            "스미싱 문자 왔는데 배운 대로 확인해보니 가짜였어요. 덕분에 안 당했습니다. 감사합니다!",
            67,
            15,
            "보안",
            true,
        ),
        post(
            "4",
            "최민수",
            Forties,
            "2일 전",
            "AI로 아이들 학습 계획 짜는 법 아시는 분 계신가요? 궁금합니다.",
            18,
            23,
            "질문",
            false,
        ),
        post(
            "5",
            "정미영",
            Fifties,
            "3일 전",
            "지난주 복지관에서 열린 AI 강좌 정말 유익했어요! 같이 참석하신 분들 모두 만나서 반가웠습니다.",
            32,
            9,
            "모임 후기",
            true,
        ),
        post(
            "6",
            "강대호",
            Sixties,
            "4일 전",
            "네이버 AI로 식단 관리 시작했어요. 혈압도 관리하고 건강해지는 느낌입니다!",
            41,
            14,
            "건강",
            true,
        ),
    ]
}

fn events() -> Vec<ContentItem> {
    vec![
        event(
            "1",
            "AI 활용 기초 오프라인 강좌",
            "2025년 10월 25일",
            "오후 2시 - 4시",
            "강남구 복지관",
            12,
            20,
            "AI 교육",
            "챗GPT, 이미지 생성 AI 등 기초부터 배웁니다",
            Some(Sixties),
        ),
        event(
            "2",
            "시니어 디지털 모임",
            "2025년 10월 27일",
            "오전 10시 - 12시",
            "서초구 도서관",
            8,
            15,
            "정기 모임",
            "스마트폰 활용 팁을 함께 나누는 시간",
            Some(Sixties),
        ),
        event(
            "3",
            "보이스피싱 예방 특강",
            "2025년 10월 28일",
            "오후 3시 - 5시",
            "온라인 (줌)",
            45,
            100,
            "보안",
            "최신 사기 수법과 대처 방법 (경찰청 협력)",
            Some(Seventies),
        ),
        event(
            "4",
            "40대를 위한 재무 AI 활용법",
            "2025년 10월 29일",
            "오후 7시 - 9시",
            "온라인 (Zoom)",
            23,
            50,
            "재무",
            "AI를 활용한 가계부, 투자 분석 실습",
            Some(Forties),
        ),
        event(
            "5",
            "50대 창업 준비반",
            "2025년 10월 30일",
            "오후 2시 - 5시",
            "송파구 창업센터",
            15,
            25,
            "창업",
            "온라인 판매부터 SNS 마케팅까지",
            Some(Fifties),
        ),
        event(
            "6",
            "동네 스마트폰 사랑방",
            "2025년 11월 1일",
            "오전 10시 - 11시",
            "마포구 주민센터",
            6,
            12,
            "정기 모임",
            "나이 상관없이 스마트폰 궁금증을 함께 풀어요",
            None,
        ),
    ]
}

fn scam_tips() -> Vec<ContentItem> {
    vec![
        scam_tip(
            "1",
            "스미싱",
            FraudRisk::High,
            "문자 메시지로 가짜 링크를 보내는 수법",
            &[
                "택배 조회를 위한 링크 클릭 요구",
                "카드 사용 내역 확인 유도",
                "정부 지원금 신청 안내",
            ],
            &[
                "발신번호가 일반 전화번호면 의심",
                "링크 주소를 길게 눌러 전체 URL 확인",
                "의심되면 공식 앱이나 홈페이지로 직접 접속",
            ],
        ),
        scam_tip(
            "2",
            "보이스피싱",
            FraudRisk::High,
            "전화로 기관을 사칭하여 돈을 요구",
            &[
                "경찰·검찰 사칭 \"계좌가 범죄에 연루\"",
                "자녀 사칭 \"급히 돈이 필요해\"",
                "금융기관 사칭 \"대출 승인 위해 인증\"",
            ],
            &[
                "전화로 절대 개인정보나 계좌번호 알려주지 않기",
                "급하게 돈을 요구하면 100% 사기",
                "끊고 공식 번호로 직접 확인",
            ],
        ),
        scam_tip(
            "3",
            "메신저피싱",
            FraudRisk::Medium,
            "카카오톡 등으로 지인 사칭",
            &[
                "\"전화번호 바뀌었어\" 후 금전 요구",
                "선물 링크로 위장한 악성 링크",
                "급한 일이라며 계좌이체 요청",
            ],
            &[
                "전화로 직접 본인 확인",
                "링크는 절대 클릭하지 말고 확인 먼저",
                "돈 요구는 반드시 통화로 재확인",
            ],
        ),
    ]
}

fn faqs() -> Vec<ContentItem> {
    vec![
        faq(
            "1",
            "AI를 처음 사용하는데 어렵나요?",
            "걱정하지 마세요! 천천히 따라하기 기능으로 단계별로 배울 수 있어요. 음성 안내도 제공됩니다.",
        ),
        faq(
            "2",
            "개인정보는 안전한가요?",
            "모든 데이터는 암호화되어 안전하게 보관되며, 사용자 동의 없이는 절대 공유되지 않습니다. 원하시면 언제든 삭제할 수 있어요.",
        ),
        faq(
            "3",
            "전화 상담 시간은 언제인가요?",
            "평일 오전 9시부터 오후 6시까지 상담이 가능합니다. 점심시간(12-1시)에도 운영됩니다.",
        ),
        faq(
            "4",
            "오프라인 강좌는 어디서 하나요?",
            "가까운 복지관, 도서관, 평생학습관에서 진행됩니다. 모임 탭에서 지역별 일정을 확인하세요.",
        ),
        faq(
            "5",
            "사기 문자를 받았어요. 어떻게 하나요?",
            "절대 링크를 클릭하지 마세요. 앱의 사기예방 센터에서 확인하거나, 즉시 상담원에게 전화주세요.",
        ),
    ]
}

fn finance_month() -> FinanceMonth {
    FinanceMonth::new(2025, 10, 3_200_000).with_expenses([
        (ExpenseCategory::Food, 680_000),
        (ExpenseCategory::Transport, 320_000),
        (ExpenseCategory::Medical, 450_000),
        (ExpenseCategory::Education, 600_000),
        (ExpenseCategory::Etc, 400_000),
    ])
}
